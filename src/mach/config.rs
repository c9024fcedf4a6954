/// Machine limits and session options.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// GOSUB and SUB frames allowed before `STACK OVERFLOW`.
    pub max_call_depth: usize,
    pub max_loop_depth: usize,
    pub max_try_depth: usize,
    /// Column width a `,` in PRINT advances to.
    pub print_zone: usize,
    /// Fixed random seed. Without one the generator is seeded from the clock.
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Config {
        Config {
            max_call_depth: 256,
            max_loop_depth: 256,
            max_try_depth: 64,
            print_zone: 14,
            seed: None,
        }
    }
}

impl Config {
    pub fn with_seed(seed: u64) -> Config {
        Config {
            seed: Some(seed),
            ..Config::default()
        }
    }
}
