use super::device::Tab;
use super::{Address, Config, Stack, Val, Var};
use crate::lang::{Error, Ident};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

/// Keys held down and keys released since the last step, as the caller
/// last reported them. Names compare case-insensitively.
#[derive(Debug, Default, Clone)]
pub struct KeyState {
    down: HashSet<String>,
    up: HashSet<String>,
}

impl KeyState {
    pub fn new() -> KeyState {
        KeyState::default()
    }

    pub fn press(&mut self, key: &str) {
        let key = key.to_uppercase();
        self.up.remove(&key);
        self.down.insert(key);
    }

    pub fn release(&mut self, key: &str) {
        let key = key.to_uppercase();
        self.down.remove(&key);
        self.up.insert(key);
    }

    /// Forget released keys once the program has had a chance to see them.
    pub fn clear_released(&mut self) {
        self.up.clear();
    }

    pub fn is_down(&self, key: &str) -> bool {
        self.down.contains(&key.to_uppercase())
    }

    pub fn is_up(&self, key: &str) -> bool {
        self.up.contains(&key.to_uppercase())
    }
}

/// An active SUB invocation.
#[derive(Debug, Clone)]
pub struct CallFrame {
    pub return_to: Address,
    pub sub_line: Address,
    pub loop_depth: usize,
    pub try_depth: usize,
}

/// Counter state of an active FOR.
#[derive(Debug, Clone)]
pub struct Counter {
    pub var: Ident,
    pub limit: Val,
    pub step: Val,
}

#[derive(Debug, Clone)]
pub struct LoopFrame {
    pub opener: Address,
    pub counter: Option<Counter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TryState {
    InTry,
    InCatch,
    InFinally,
}

#[derive(Debug, Clone)]
pub struct TryFrame {
    pub try_line: Address,
    pub state: TryState,
    /// Error that resumes propagating after FINALLY.
    pub pending: Option<Error>,
    pub loop_depth: usize,
    pub call_depth: usize,
    pub gosub_depth: usize,
    pub var_depth: usize,
}

/// ## Execution context
///
/// Everything a running program can change. One per session.

pub struct Context {
    pub vars: Var,
    pub pc: Address,
    pub gosubs: Stack<Address>,
    pub calls: Stack<CallFrame>,
    pub loops: Stack<LoopFrame>,
    pub tries: Stack<TryFrame>,
    pub rng: StdRng,
    /// Line supplied for a waiting INPUT.
    pub input: Option<String>,
    pub print_column: usize,
    pub active_tab: Tab,
    pub ended: bool,
}

impl Context {
    pub fn new(config: &Config) -> Context {
        Context {
            vars: Var::new(),
            pc: 0,
            gosubs: Stack::new("GOSUB stack overflow", config.max_call_depth),
            calls: Stack::new("SUB call stack overflow", config.max_call_depth),
            loops: Stack::new("too many nested loops", config.max_loop_depth),
            tries: Stack::new("too many nested TRY blocks", config.max_try_depth),
            rng: seeded_rng(config.seed),
            input: None,
            print_column: 0,
            active_tab: Tab::Console,
            ended: false,
        }
    }

    pub fn reset(&mut self, config: &Config) {
        *self = Context::new(config);
    }

    /// GOSUB and SUB frames together.
    pub fn call_depth(&self) -> usize {
        self.gosubs.len() + self.calls.len()
    }
}

pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(chrono::Local::now().timestamp_millis() as u64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_keys() {
        let mut k = KeyState::new();
        k.press("a");
        assert!(k.is_down("A"));
        k.release("A");
        assert!(!k.is_down("a"));
        assert!(k.is_up("a"));
        k.clear_released();
        assert!(!k.is_up("a"));
    }

    #[test]
    fn test_seeded_rng_repeats() {
        let mut a = seeded_rng(Some(7));
        let mut b = seeded_rng(Some(7));
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }

    #[test]
    fn test_reset() {
        let config = Config::with_seed(1);
        let mut ctx = Context::new(&config);
        ctx.pc = 9;
        ctx.gosubs.push(3).unwrap();
        ctx.reset(&config);
        assert_eq!(ctx.pc, 0);
        assert_eq!(ctx.call_depth(), 0);
    }
}
