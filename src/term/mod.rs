extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use ansi_term::Style;
use basic::error;
use basic::lang::{canonicalize, Error};
use basic::mach::{Config, Devices, Event, KeyState, Program, Runtime};
use clap::Parser;
use linefeed::{Completer, Completion, Interface, Prompter, ReadResult, Signal, Terminal};
use std::fs::File;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Runs a program file, or starts the interactive editor without one.
#[derive(Debug, Parser)]
#[command(name = "edubasic", about = "EduBASIC, a structured BASIC for the classroom")]
pub struct Options {
    /// Seed for RND, so runs repeat.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Step budget for one RUN. Unlimited when absent.
    #[arg(long)]
    pub steps: Option<usize>,

    /// Program to run.
    pub file: Option<PathBuf>,
}

impl Options {
    fn config(&self) -> Config {
        Config {
            seed: self.seed,
            ..Config::default()
        }
    }
}

pub fn main(options: Options) {
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    if let Err(error) = main_loop(options, interrupted) {
        eprintln!("{}", error);
    }
}

fn main_loop(options: Options, interrupted: Arc<AtomicBool>) -> std::io::Result<()> {
    let command = Interface::new("EduBASIC")?;
    command.set_prompt("> ")?;
    let input = Interface::new("Input")?;
    input.set_report_signal(Signal::Interrupt, true);
    let mut session = Session {
        runtime: Runtime::new(options.config(), Devices::default()),
        source: vec![],
        keys: KeyState::new(),
        steps: options.steps,
        interrupted,
    };

    if let Some(filename) = &options.file {
        match load(filename) {
            Ok(source) => {
                session.source = source;
                session.run(&command, &input)?;
            }
            Err(error) => print_error(&command, &error)?,
        }
        return Ok(());
    }

    command.write_fmt(format_args!("EduBASIC\n"))?;
    loop {
        command.set_completer(Arc::new(LineCompleter::new(session.source.clone())));
        let string = match command.read_line()? {
            ReadResult::Input(string) => string,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        if !string.trim().is_empty() {
            command.add_history_unique(string.clone());
        }
        session.enter(&command, &input, &string)?;
    }
    Ok(())
}

/// The program being edited and the runtime that executes it.
struct Session {
    runtime: Runtime,
    source: Vec<String>,
    keys: KeyState,
    steps: Option<usize>,
    interrupted: Arc<AtomicBool>,
}

impl Session {
    fn enter<T: Terminal>(
        &mut self,
        command: &Interface<T>,
        input: &Interface<T>,
        string: &str,
    ) -> std::io::Result<()> {
        let trimmed = string.trim();
        let (word, rest) = match trimmed.find(char::is_whitespace) {
            Some(i) => (&trimmed[..i], trimmed[i..].trim()),
            None => (trimmed, ""),
        };
        match word.to_ascii_uppercase().as_str() {
            "" => Ok(()),
            "RUN" => self.run(command, input),
            "LIST" => self.list(command),
            "NEW" => {
                self.source.clear();
                if let Err(error) = self.runtime.load("") {
                    print_error(command, &error)?;
                }
                Ok(())
            }
            "LOAD" => {
                match load(unquote(rest)) {
                    Ok(source) => self.source = source,
                    Err(error) => print_error(command, &error)?,
                }
                Ok(())
            }
            "SAVE" => {
                if let Err(error) = save(&self.source, unquote(rest)) {
                    print_error(command, &error)?;
                }
                Ok(())
            }
            _ => match word.parse::<usize>() {
                Ok(number) => self.edit(command, number, rest),
                Err(_) => self.direct(command, input, trimmed),
            },
        }
    }

    /// `N text` replaces line N, `N` alone deletes it. Lines count from 1.
    fn edit<T: Terminal>(&mut self, command: &Interface<T>, number: usize, text: &str) -> std::io::Result<()> {
        let len = self.source.len();
        if number == 0 || number > len + 1 {
            let error = error!(IllegalFunctionCall; format!("line {} is past the end ({} lines)", number, len));
            return print_error(command, &error);
        }
        if text.is_empty() {
            if number <= len {
                self.source.remove(number - 1);
            }
            return Ok(());
        }
        let text = match canonicalize(text) {
            Ok(text) => text,
            Err(error) => return print_error(command, &error),
        };
        if number > len {
            self.source.push(text);
        } else {
            self.source[number - 1] = text;
        }
        Ok(())
    }

    fn direct<T: Terminal>(
        &mut self,
        command: &Interface<T>,
        input: &Interface<T>,
        string: &str,
    ) -> std::io::Result<()> {
        loop {
            match self.runtime.step_line(&self.keys, string) {
                Event::Input(prompt) => match read_input(input, &prompt)? {
                    Some(line) => self.runtime.enter_input(&line),
                    None => return Ok(()),
                },
                event => return self.show(command, event).map(|_| ()),
            }
        }
    }

    fn run<T: Terminal>(&mut self, command: &Interface<T>, input: &Interface<T>) -> std::io::Result<()> {
        if let Err(error) = self.runtime.load(&self.source.join("\n")) {
            return print_error(command, &error);
        }
        let mut budget = self.steps.unwrap_or(usize::MAX);
        while budget > 0 {
            if self.interrupted.swap(false, Ordering::SeqCst) {
                command.write_fmt(format_args!("BREAK\n"))?;
                return Ok(());
            }
            let batch = budget.min(5000);
            budget -= batch;
            match self.runtime.run(&self.keys, batch) {
                Event::Input(prompt) => match read_input(input, &prompt)? {
                    Some(line) => self.runtime.enter_input(&line),
                    None => return Ok(()),
                },
                Event::Sleep(ms) => std::thread::sleep(Duration::from_millis(ms)),
                event => {
                    if !self.show(command, event)? {
                        return Ok(());
                    }
                }
            }
            self.keys.clear_released();
        }
        command.write_fmt(format_args!("{}\n", Style::new().bold().paint("STEP LIMIT REACHED")))
    }

    /// Writes an event. False once the program cannot go on.
    fn show<T: Terminal>(&mut self, command: &Interface<T>, event: Event) -> std::io::Result<bool> {
        match event {
            Event::Print(s) => command.write_fmt(format_args!("{}", s))?,
            Event::Errors(errors) => {
                for error in errors.iter() {
                    print_error(command, error)?;
                }
                return Ok(false);
            }
            Event::Ended => return Ok(false),
            Event::Running | Event::Input(_) | Event::Sleep(_) => {}
        }
        Ok(true)
    }

    fn list<T: Terminal>(&self, command: &Interface<T>) -> std::io::Result<()> {
        let mut program = Program::new();
        for text in &self.source {
            if let Err(error) = program.push(text) {
                return print_error(command, &error);
            }
        }
        let errors = program.link();
        for addr in 0..program.len() {
            if let Some((text, columns)) = program.list_line(addr) {
                let number = format!("{:>4} ", addr + 1);
                let columns: Vec<_> = columns
                    .iter()
                    .map(|c| c.start + number.len()..c.end + number.len())
                    .collect();
                command.write_fmt(format_args!(
                    "{}\n",
                    decorate_list(&format!("{}{}", number, text), &columns)
                ))?;
            }
        }
        for error in errors.iter().filter(|e| !e.is_parse()) {
            print_error(command, error)?;
        }
        Ok(())
    }
}

fn read_input<T: Terminal>(input: &Interface<T>, prompt: &str) -> std::io::Result<Option<String>> {
    input.set_prompt(prompt)?;
    match input.read_line()? {
        ReadResult::Input(string) => {
            input.add_history_unique(string.clone());
            Ok(Some(string))
        }
        ReadResult::Signal(Signal::Interrupt) => {
            input.set_buffer("")?;
            input.lock_reader().cancel_read_line()?;
            Ok(None)
        }
        ReadResult::Signal(_) | ReadResult::Eof => Ok(None),
    }
}

fn print_error<T: Terminal>(command: &Interface<T>, error: &Error) -> std::io::Result<()> {
    command.write_fmt(format_args!(
        "{}\n",
        Style::new().bold().paint(error.to_string())
    ))
}

struct LineCompleter {
    source: Vec<String>,
}

impl LineCompleter {
    fn new(source: Vec<String>) -> LineCompleter {
        LineCompleter { source }
    }
}

impl<Term: Terminal> Completer<Term> for LineCompleter {
    fn complete(
        &self,
        _word: &str,
        prompter: &Prompter<Term>,
        _start: usize,
        _end: usize,
    ) -> Option<Vec<Completion>> {
        let num = prompter.buffer().trim().parse::<usize>().ok()?;
        let text = self.source.get(num.checked_sub(1)?)?;
        let mut comp = Completion::simple(format!("{} {}", num, text));
        comp.suffix = linefeed::complete::Suffix::None;
        Some(vec![comp])
    }
}

fn decorate_list(ins: &str, columns: &[std::ops::Range<usize>]) -> String {
    let mut under_on = false;
    let mut out = String::new();
    let style = Style::new().underline();
    let prefix = format!("{}", style.prefix());
    let suffix = format!("{}", style.suffix());
    let mut index = 0;
    for char in ins.chars() {
        let do_under = columns.iter().any(|c| c.contains(&index));
        if under_on {
            if !do_under {
                out.push_str(&suffix);
            }
        } else if do_under {
            out.push_str(&prefix);
        }
        under_on = do_under;
        out.push(char);
        index += 1;
    }
    if columns.iter().any(|c| c.start == index) {
        under_on = true;
        out.push_str(&prefix);
        out.push(' ');
    }
    if under_on {
        out.push_str(&suffix);
    }
    out
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches('"')
}

fn load<P: AsRef<Path>>(filename: P) -> Result<Vec<String>, Error> {
    match std::fs::read_to_string(filename) {
        Ok(text) => Ok(text.lines().map(|l| l.to_string()).collect()),
        Err(error) => {
            let msg = error.to_string();
            match error.kind() {
                ErrorKind::NotFound => Err(error!(FileNotFound; msg.as_str())),
                _ => Err(error!(DiskIoError; msg.as_str())),
            }
        }
    }
}

fn save<P: AsRef<Path>>(source: &[String], filename: P) -> Result<(), Error> {
    if source.is_empty() {
        return Err(error!(IllegalFunctionCall; "nothing to save"));
    }
    let mut file = match File::create(filename) {
        Ok(file) => file,
        Err(error) => return Err(error!(DiskIoError; error.to_string().as_str())),
    };
    for line in source {
        if let Err(error) = writeln!(file, "{}", line) {
            return Err(error!(DiskIoError; error.to_string().as_str()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Result<Options, clap::Error> {
        Options::try_parse_from(std::iter::once("edubasic").chain(s.split_whitespace()))
    }

    #[test]
    fn test_options() {
        let o = parse("--seed 7 --steps 100 game.bas").unwrap();
        assert_eq!(o.seed, Some(7));
        assert_eq!(o.steps, Some(100));
        assert_eq!(o.file, Some(PathBuf::from("game.bas")));
        assert_eq!(parse("").unwrap().file, None);
        assert!(parse("--seed").is_err());
        assert!(parse("--seed x").is_err());
        assert!(parse("--fast").is_err());
        assert!(parse("a.bas b.bas").is_err());
    }

    #[test]
    fn test_decorate_list() {
        let s = decorate_list("ab", &[1..2]);
        assert!(s.starts_with('a'));
        assert!(s.contains('b'));
        assert_eq!(decorate_list("ab", &[]), "ab");
    }
}
