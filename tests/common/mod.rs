#![allow(dead_code)]

use basic::lang::Error;
use basic::mach::device::Recorder;
use basic::mach::{Config, Devices, Event, KeyState, Runtime};

pub fn runtime(source: &str) -> Runtime {
    let mut r = Runtime::new(Config::with_seed(1), Devices::default());
    r.load(source).unwrap();
    r
}

pub fn recording(source: &str) -> (Runtime, Recorder) {
    let recorder = Recorder::new();
    let mut r = Runtime::new(Config::with_seed(1), Devices::recording(&recorder));
    r.load(source).unwrap();
    (r, recorder)
}

pub fn exec(runtime: &mut Runtime) -> String {
    exec_n(runtime, 5000)
}

/// Runs until the program ends, fails, or waits for input. Printed text,
/// input prompts and error reports are collected in order.
pub fn exec_n(runtime: &mut Runtime, steps: usize) -> String {
    let keys = KeyState::new();
    let mut s = String::new();
    loop {
        match runtime.run(&keys, steps) {
            Event::Print(ps) => s.push_str(&ps),
            Event::Sleep(_) => {}
            Event::Input(prompt) => {
                s.push_str(&prompt);
                break;
            }
            Event::Errors(errors) => {
                for error in errors.iter() {
                    s.push_str(&format!("{}\n", error));
                }
                break;
            }
            Event::Ended => break,
            Event::Running => {
                s.push_str(&format!("\n{} steps exceeded.\n", steps));
                break;
            }
        }
    }
    s
}

pub fn run(source: &str) -> String {
    exec(&mut runtime(source))
}

/// First error a program stops with.
pub fn run_error(source: &str) -> Error {
    let mut r = runtime(source);
    let keys = KeyState::new();
    loop {
        match r.run(&keys, 5000) {
            Event::Errors(errors) => return errors[0].clone(),
            Event::Print(_) | Event::Sleep(_) => {}
            event => panic!("expected an error, got {:?}", event),
        }
    }
}
