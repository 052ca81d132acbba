mod deps {
    pub use tagged_config as config;
}

use deps::config::TaggedConfig;

#[derive(Debug, Default, TaggedConfig)]
#[tagged(crate = "deps::config")]
struct ReexportedConfig {
    #[tagged(docker = "ENABLED")]
    enabled: bool,
}

fn main() {
    let names: Vec<&str> = ReexportedConfig::fields()
        .iter()
        .map(deps::config::Field::name)
        .collect();
    assert_eq!(names, ["enabled"]);
}
