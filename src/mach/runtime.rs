use super::device::Devices;
use super::exec::{raw_message, Flow, Machine};
use super::{Address, Config, Context, KeyState, Program};
use crate::error;
use crate::lang::{parse_line, Error};
use std::rc::Rc;
use tracing::debug;

type Result<T> = std::result::Result<T, Error>;

/// Address given to statements entered in direct mode. Nothing links to it.
const DIRECT: Address = usize::MAX;

/// What one step produced. Anything but `Running` needs the caller's
/// attention.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Running,
    Print(String),
    /// INPUT is waiting; supply a line with [`Runtime::enter_input`].
    Input(String),
    /// Requested pause in milliseconds.
    Sleep(u64),
    Ended,
    Errors(Rc<Vec<Error>>),
}

/// ## Runtime
///
/// Owns a program, its execution context and its devices, and steps the
/// program one statement at a time.

pub struct Runtime {
    config: Config,
    program: Program,
    ctx: Context,
    devices: Devices,
}

impl Default for Runtime {
    fn default() -> Runtime {
        Runtime::new(Config::default(), Devices::default())
    }
}

impl Runtime {
    pub fn new(config: Config, devices: Devices) -> Runtime {
        Runtime {
            ctx: Context::new(&config),
            config,
            program: Program::new(),
            devices,
        }
    }

    /// Replaces the program with `source`, links it and resets the context.
    pub fn load(&mut self, source: &str) -> Result<()> {
        self.program = Program::parse(source)?;
        self.reset();
        Ok(())
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn devices_mut(&mut self) -> &mut Devices {
        &mut self.devices
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    pub fn errors(&self) -> Rc<Vec<Error>> {
        self.program.errors()
    }

    pub fn is_runnable(&self) -> bool {
        self.program.is_runnable()
    }

    pub fn is_ended(&self) -> bool {
        self.ctx.ended || self.ctx.pc >= self.program.len()
    }

    /// Clears all variables and stacks and rewinds to the first line.
    pub fn reset(&mut self) {
        self.ctx.reset(&self.config);
    }

    /// Supplies the line a waiting INPUT asked for.
    pub fn enter_input(&mut self, line: &str) {
        self.ctx.input = Some(line.to_string());
    }

    /// Executes the statement at the program counter.
    pub fn step(&mut self, keys: &KeyState) -> Event {
        if !self.program.is_linked() {
            self.program.link();
        }
        if !self.program.is_runnable() {
            return Event::Errors(self.program.errors());
        }
        if self.is_ended() {
            self.ctx.ended = true;
            return Event::Ended;
        }
        let line = self.ctx.pc;
        let program = &self.program;
        let statement = match program.statement(line) {
            Some(s) => s,
            None => return Event::Ended,
        };
        debug!(line, statement = %statement, "step");
        let mut machine = Machine {
            ctx: &mut self.ctx,
            program,
            devices: &mut self.devices,
            keys,
            config: &self.config,
            line,
            event: None,
        };
        let flow = match machine.execute(statement) {
            Ok(flow) => flow,
            Err(e) => match machine.raise(e) {
                Ok(addr) => Flow::Jump(addr),
                Err(e) => {
                    let fault = fault(program, e);
                    if let Some(console) = self.devices.console.as_mut() {
                        console.print_error(&fault.to_string());
                    }
                    self.ctx.ended = true;
                    return Event::Errors(Rc::new(vec![fault]));
                }
            },
        };
        let event = machine.event.take();
        if let Flow::Jump(addr) = flow {
            machine.drop_stale_tries(addr);
        }
        match flow {
            Flow::Continue => self.ctx.pc = line + 1,
            Flow::Jump(addr) => self.ctx.pc = addr,
            Flow::Wait => {}
            Flow::End => {
                self.ctx.ended = true;
                return event.unwrap_or(Event::Ended);
            }
        }
        event.unwrap_or(Event::Running)
    }

    /// Steps until something needs the caller or `max_steps` run out.
    pub fn run(&mut self, keys: &KeyState, max_steps: usize) -> Event {
        for _ in 0..max_steps {
            match self.step(keys) {
                Event::Running => continue,
                event => return event,
            }
        }
        Event::Running
    }

    /// Executes one statement typed outside the program. Block and jump
    /// statements need links and are refused.
    pub fn step_line(&mut self, keys: &KeyState, text: &str) -> Event {
        let parsed = match parse_line(text, 0) {
            Ok(parsed) => parsed,
            Err(e) => return Event::Errors(Rc::new(vec![e])),
        };
        if let Some(e) = parsed.error {
            return Event::Errors(Rc::new(vec![e]));
        }
        let mut machine = Machine {
            ctx: &mut self.ctx,
            program: &self.program,
            devices: &mut self.devices,
            keys,
            config: &self.config,
            line: DIRECT,
            event: None,
        };
        match machine.execute(&parsed.statement) {
            Ok(Flow::Jump(_)) => Event::Errors(Rc::new(vec![
                error!(IllegalFunctionCall; format!("{} is not allowed in direct mode", parsed.statement)),
            ])),
            Ok(_) => machine.event.take().unwrap_or(Event::Running),
            Err(e) => {
                let text = raw_message(&e);
                let e = Error::new(e.code()).message(format!("{} [{}]", text, parsed.statement));
                Event::Errors(Rc::new(vec![e]))
            }
        }
    }
}

/// Decorates an uncaught error with the statement it came from.
fn fault(program: &Program, e: Error) -> Error {
    let message = match e.line_number().and_then(|n| program.statement(n)) {
        Some(statement) => format!("{} [{}]", raw_message(&e), statement),
        None => raw_message(&e),
    };
    let fault = e.message(message);
    tracing::error!(line = ?fault.line_number(), "{}", fault);
    fault
}
