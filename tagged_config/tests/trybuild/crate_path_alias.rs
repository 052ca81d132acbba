use std::collections::HashMap;

use tagged_config::{Populator, Tag, TaggedConfig};

/// Uses the real crate name as the alias so no dependency renaming is
/// needed in the trybuild project.
#[derive(Debug, Default, TaggedConfig)]
#[tagged(crate = "tagged_config")]
struct AliasedConfig {
    #[tagged(env = "VALUE")]
    value: String,
    #[tagged(env = "COUNT")]
    count: u32,
}

fn main() {
    let source: HashMap<String, String> = HashMap::new();
    let mut config = AliasedConfig::default();
    let result = Populator::new(&source, Tag::ENV).populate(&mut config);
    let _: tagged_config::TaggedResult<()> = result;
}
