use super::context::{CallFrame, Counter, LoopFrame, TryFrame, TryState};
use super::device::{Devices, Tab};
use super::runtime::Event;
use super::var::Scope;
use super::{Address, Config, Context, KeyState, Operation, Program, Slot, Val};
use crate::error;
use crate::lang::ast::{
    BinaryOp, Block, CaseTest, Condition, Expression, Param, PrintItem, Statement, Variable,
};
use crate::lang::{Error, Ident};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::convert::TryFrom;
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// What happens after a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Jump(Address),
    End,
    /// Stay on this line; the caller must supply something first.
    Wait,
}

/// ## Statement execution
///
/// Borrows everything one step touches. `line` is the address of the
/// statement being executed.

pub struct Machine<'a> {
    pub ctx: &'a mut Context,
    pub program: &'a Program,
    pub devices: &'a mut Devices,
    pub keys: &'a KeyState,
    pub config: &'a Config,
    pub line: Address,
    pub event: Option<Event>,
}

impl<'a> Machine<'a> {
    pub fn link(&self, slot: Slot) -> Result<Address> {
        self.link_of(self.line, slot)
    }

    pub fn link_of(&self, line: Address, slot: Slot) -> Result<Address> {
        match self.program.links().get(line, slot) {
            Some(addr) => Ok(addr),
            None => Err(error!(InternalError; "statement is not linked")),
        }
    }

    fn statement_at(&self, line: Address) -> Result<&'a Statement> {
        let program = self.program;
        match program.statement(line) {
            Some(s) => Ok(s),
            None => Err(error!(InternalError; format!("no line {}", line))),
        }
    }

    pub fn execute(&mut self, statement: &Statement) -> Result<Flow> {
        use Statement::*;
        match statement {
            Unparsable(_, Some(e)) => Err(error!(Unparsable; e.to_string())),
            Unparsable(_, None) => Ok(Flow::Continue),
            Let(var, expr) => {
                let val = self.eval(expr)?;
                self.assign(var, val)?;
                Ok(Flow::Continue)
            }
            Dim(arrays) => {
                for (ident, dims) in arrays {
                    let mut bounds = vec![];
                    for d in dims {
                        bounds.push(self.int(d)?);
                    }
                    self.ctx.vars.dimension(ident, &bounds)?;
                }
                Ok(Flow::Continue)
            }
            Local(idents) => {
                for ident in idents {
                    self.ctx.vars.declare_local(ident);
                }
                Ok(Flow::Continue)
            }
            Print(items) => self.print(items),
            Input(prompt, vars) => self.input(prompt, vars),
            If(cond) => {
                if self.condition(cond)? {
                    Ok(Flow::Continue)
                } else {
                    self.next_clause(self.line)
                }
            }
            ElseIf(_) | Else | Case(_) | CaseElse => Ok(Flow::Jump(self.link(Slot::End)?)),
            EndIf | EndUnless | EndSelect | Label(_) => Ok(Flow::Continue),
            Unless(cond) => {
                if self.condition(cond)? {
                    Ok(Flow::Jump(self.link(Slot::End)?))
                } else {
                    Ok(Flow::Continue)
                }
            }
            Select(expr) => {
                let val = self.eval(expr)?;
                self.select(val)
            }
            For(var, from, to, step) => self.for_loop(var, from, to, step.as_ref()),
            Next(_) => self.next(),
            While(cond) => {
                let opener = self.line;
                if self.condition(cond)? {
                    self.enter_loop(opener, None)?;
                    Ok(Flow::Continue)
                } else {
                    self.leave_loop(opener);
                    Ok(Flow::Jump(self.link(Slot::End)? + 1))
                }
            }
            Wend => Ok(Flow::Jump(self.link(Slot::Opener)?)),
            Do(cond) => {
                let opener = self.line;
                if self.keep_looping(cond)? {
                    self.enter_loop(opener, None)?;
                    Ok(Flow::Continue)
                } else {
                    self.leave_loop(opener);
                    Ok(Flow::Jump(self.link(Slot::End)? + 1))
                }
            }
            Loop(cond) => {
                let opener = self.link(Slot::Opener)?;
                if self.keep_looping(cond)? {
                    Ok(Flow::Jump(opener))
                } else {
                    self.leave_loop(opener);
                    Ok(Flow::Continue)
                }
            }
            Until(_) => {
                self.enter_loop(self.line, None)?;
                Ok(Flow::Continue)
            }
            Uend => {
                let opener = self.link(Slot::Opener)?;
                let cond = match self.statement_at(opener)? {
                    Until(cond) => cond,
                    _ => return Err(error!(InternalError; "UEND is not linked to UNTIL")),
                };
                if self.condition(cond)? {
                    self.leave_loop(opener);
                    Ok(Flow::Continue)
                } else {
                    Ok(Flow::Jump(opener + 1))
                }
            }
            Sub(..) => Ok(Flow::Jump(self.link(Slot::End)? + 1)),
            EndSub => self.end_sub(),
            Call(name, args) => self.call(name, args),
            Goto(_) => Ok(Flow::Jump(self.link(Slot::Target)?)),
            Gosub(_) => {
                let target = self.link(Slot::Target)?;
                self.check_call_depth()?;
                self.ctx.gosubs.push(self.line + 1)?;
                Ok(Flow::Jump(target))
            }
            Return => {
                if self.ctx.gosubs.is_empty() {
                    return Err(error!(ReturnWithoutGosub; "RETURN without GOSUB"));
                }
                Ok(Flow::Jump(self.ctx.gosubs.pop()?))
            }
            Try => self.enter_try(),
            Catch(_) => match self.program.links().get(self.line, Slot::Finally) {
                Some(finally) => Ok(Flow::Jump(finally)),
                None => Ok(Flow::Jump(self.link(Slot::End)?)),
            },
            Finally => {
                if let Some(frame) = self.ctx.tries.last_mut() {
                    frame.state = TryState::InFinally;
                }
                Ok(Flow::Continue)
            }
            EndTry => self.end_try(),
            Throw(expr) => {
                let val = self.eval(expr)?;
                Err(error!(UserThrow; val.to_string()))
            }
            Exit(block) => {
                let opener = self.link(Slot::Target)?;
                let end = self.link_of(opener, Slot::End)?;
                if *block == Block::Sub {
                    return Ok(Flow::Jump(end));
                }
                self.leave_loop(opener);
                Ok(Flow::Jump(end + 1))
            }
            Continue(_) => {
                let opener = self.link(Slot::Target)?;
                Ok(Flow::Jump(self.link_of(opener, Slot::End)?))
            }
            End => Ok(Flow::End),
            Randomize(seed) => {
                self.ctx.rng = match seed {
                    Some(expr) => StdRng::seed_from_u64(self.int(expr)? as u64),
                    None => StdRng::seed_from_u64(chrono::Local::now().timestamp_millis() as u64),
                };
                Ok(Flow::Continue)
            }
            Sleep(expr) => {
                let val = self.eval(expr)?;
                if !val.is_number() || matches!(val, Val::Complex(_)) {
                    return Err(error!(TypeMismatch; "SLEEP: milliseconds must be a number"));
                }
                let ms = val.to_f64()?.max(0.0) as u64;
                self.event = Some(Event::Sleep(ms));
                Ok(Flow::Continue)
            }
            Swap(a, b) => {
                let va = self.fetch(a)?;
                let vb = self.fetch(b)?;
                self.assign(a, vb)?;
                self.assign(b, va)?;
                Ok(Flow::Continue)
            }
            Sort(ident, descending) => self.sort(ident, *descending),
            Erase(idents) => {
                for ident in idents {
                    self.ctx.vars.erase(ident);
                }
                Ok(Flow::Continue)
            }
            Cls | Help(_) | Console(_) | Set(..) | Color(..) | Pset(..) | Line(..)
            | Rectangle(..) | Oval(..) | Circle(..) | Triangle(..) | Arc(..) | Paint(..)
            | GetSprite(..) | PutSprite(..) | Turtle(_) | Tempo(_) | Volume(_) | Voice(..)
            | Play(..) => self.execute_device(statement),
            Open(..) | Close(_) | Write(..) | WriteLine(..) | ReadLine(..) | Seek(..)
            | ReadFile(..) | WriteFile(..) | ListDir(..) | MkDir(_) | RmDir(_) | Delete(_)
            | Copy(..) | Move(..) => self.execute_file(statement),
        }
    }

    pub fn condition(&mut self, expr: &Expression) -> Result<bool> {
        self.eval(expr)?.is_true()
    }

    pub fn int(&mut self, expr: &Expression) -> Result<i64> {
        i64::try_from(&self.eval(expr)?)
    }

    pub fn real(&mut self, expr: &Expression) -> Result<f64> {
        match self.eval(expr)? {
            Val::Complex(_) => Err(error!(TypeMismatch; "expected a real number")),
            val => val.to_f64(),
        }
    }

    pub fn string(&mut self, expr: &Expression) -> Result<Rc<str>> {
        match self.eval(expr)? {
            Val::String(s) => Ok(s),
            val => Err(error!(TypeMismatch; format!("expected a string, not {}", val.type_name()))),
        }
    }

    pub fn assign(&mut self, var: &Variable, val: Val) -> Result<()> {
        match var {
            Variable::Unary(ident) => self.ctx.vars.store(ident, val),
            Variable::Member(ident, member) => self.ctx.vars.store(&member_ident(ident, member), val),
            Variable::Index(ident, dims) => {
                let idx = self.indices(dims)?;
                self.ctx.vars.store_index(ident, &idx, val)
            }
            Variable::Array(ident) => {
                Err(error!(TypeMismatch; format!("cannot assign to the whole array {}", ident)))
            }
        }
    }

    pub fn indices(&mut self, dims: &[Expression]) -> Result<Vec<i64>> {
        let mut idx = Vec::with_capacity(dims.len());
        for d in dims {
            idx.push(self.int(d)?);
        }
        Ok(idx)
    }

    fn print(&mut self, items: &[PrintItem]) -> Result<Flow> {
        let zone = self.config.print_zone.max(1);
        let mut column = self.ctx.print_column;
        let mut text = String::new();
        for item in items {
            match item {
                PrintItem::Expression(expr) => {
                    let val = self.eval(expr)?;
                    emit(&mut text, &mut column, &val.to_string());
                }
                PrintItem::Semicolon => {}
                PrintItem::Comma => {
                    let pad = zone - column % zone;
                    emit(&mut text, &mut column, &" ".repeat(pad));
                }
            }
        }
        if !matches!(items.last(), Some(PrintItem::Semicolon) | Some(PrintItem::Comma)) {
            emit(&mut text, &mut column, "\n");
        }
        self.ctx.print_column = column;
        self.event = Some(Event::Print(text));
        Ok(Flow::Continue)
    }

    fn input(&mut self, prompt: &Option<Rc<str>>, vars: &[Variable]) -> Result<Flow> {
        let line = match self.ctx.input.take() {
            Some(line) => line,
            None => {
                let prompt = match prompt {
                    Some(p) => p.to_string(),
                    None => "? ".to_string(),
                };
                self.event = Some(Event::Input(prompt));
                return Ok(Flow::Wait);
            }
        };
        self.ctx.print_column = 0;
        let mut fields = line.split(',');
        for var in vars {
            let field = fields.next().unwrap_or("").trim();
            let val = input_value(var_ident(var), field)?;
            self.assign(var, val)?;
        }
        Ok(Flow::Continue)
    }

    /// Walks an IF chain after its condition failed.
    fn next_clause(&mut self, mut line: Address) -> Result<Flow> {
        loop {
            let next = self.link_of(line, Slot::NextClause)?;
            match self.statement_at(next)? {
                Statement::ElseIf(cond) => {
                    if self.condition(cond)? {
                        return Ok(Flow::Jump(next + 1));
                    }
                    line = next;
                }
                _ => return Ok(Flow::Jump(next + 1)),
            }
        }
    }

    fn select(&mut self, val: Val) -> Result<Flow> {
        let mut line = self.line;
        loop {
            let next = self.link_of(line, Slot::NextClause)?;
            match self.statement_at(next)? {
                Statement::Case(tests) => {
                    for test in tests {
                        if self.case_matches(&val, test)? {
                            return Ok(Flow::Jump(next + 1));
                        }
                    }
                    line = next;
                }
                Statement::CaseElse => return Ok(Flow::Jump(next + 1)),
                _ => return Ok(Flow::Jump(next)),
            }
        }
    }

    fn case_matches(&mut self, val: &Val, test: &CaseTest) -> Result<bool> {
        match test {
            CaseTest::Value(expr) => {
                let v = self.eval(expr)?;
                Operation::equal_bool(val.clone(), v)
            }
            CaseTest::Range(lo, hi) => {
                let lo = self.eval(lo)?;
                let hi = self.eval(hi)?;
                Ok(Operation::compare(BinaryOp::GreaterEqual, val.clone(), lo)?
                    && Operation::compare(BinaryOp::LessEqual, val.clone(), hi)?)
            }
            CaseTest::Is(op, expr) => {
                let v = self.eval(expr)?;
                Operation::compare(*op, val.clone(), v)
            }
        }
    }

    fn enter_loop(&mut self, opener: Address, counter: Option<Counter>) -> Result<()> {
        self.leave_loop(opener);
        self.ctx.loops.push(LoopFrame { opener, counter })
    }

    /// Drops the frame of the loop opened at `opener` and any inside it.
    fn leave_loop(&mut self, opener: Address) {
        if let Some(i) = self.loop_index(opener) {
            self.ctx.loops.truncate(i);
        }
    }

    /// Index of the active frame for the loop at `opener`. Frames that
    /// belong to callers of the current SUB are not visible.
    fn loop_index(&self, opener: Address) -> Option<usize> {
        let base = self.ctx.calls.last().map_or(0, |f| f.loop_depth);
        self.ctx
            .loops
            .rposition(|f| f.opener == opener)
            .filter(|i| *i >= base)
    }

    fn keep_looping(&mut self, cond: &Condition) -> Result<bool> {
        match cond {
            Condition::Always => Ok(true),
            Condition::While(expr) => self.condition(expr),
            Condition::Until(expr) => Ok(!self.condition(expr)?),
        }
    }

    fn counting(value: &Val, counter: &Counter) -> Result<bool> {
        let up = Operation::compare(BinaryOp::GreaterEqual, counter.step.clone(), Val::Integer(0))?;
        let op = if up {
            BinaryOp::LessEqual
        } else {
            BinaryOp::GreaterEqual
        };
        Operation::compare(op, value.clone(), counter.limit.clone())
    }

    fn for_loop(
        &mut self,
        var: &Ident,
        from: &Expression,
        to: &Expression,
        step: Option<&Expression>,
    ) -> Result<Flow> {
        let from = self.eval(from)?;
        let limit = self.eval(to)?;
        let step = match step {
            Some(expr) => self.eval(expr)?,
            None => Val::Integer(1),
        };
        self.ctx.vars.store(var, from)?;
        let counter = Counter {
            var: var.clone(),
            limit,
            step,
        };
        let value = self.ctx.vars.fetch(var);
        if Machine::counting(&value, &counter)? {
            self.enter_loop(self.line, Some(counter))?;
            Ok(Flow::Continue)
        } else {
            self.leave_loop(self.line);
            Ok(Flow::Jump(self.link(Slot::End)? + 1))
        }
    }

    fn next(&mut self) -> Result<Flow> {
        let opener = self.link(Slot::Opener)?;
        let index = match self.loop_index(opener) {
            Some(i) => i,
            None => return Err(error!(IllegalFunctionCall; "NEXT without FOR")),
        };
        self.ctx.loops.truncate(index + 1);
        let counter = match self.ctx.loops.last().and_then(|f| f.counter.clone()) {
            Some(c) => c,
            None => return Err(error!(InternalError; "FOR frame has no counter")),
        };
        let value = Operation::sum(self.ctx.vars.fetch(&counter.var), counter.step.clone())?;
        self.ctx.vars.store(&counter.var, value)?;
        let value = self.ctx.vars.fetch(&counter.var);
        if Machine::counting(&value, &counter)? {
            Ok(Flow::Jump(opener + 1))
        } else {
            self.ctx.loops.truncate(index);
            Ok(Flow::Continue)
        }
    }

    fn check_call_depth(&self) -> Result<()> {
        if self.ctx.call_depth() >= self.config.max_call_depth {
            return Err(error!(StackOverflow; "too many nested calls"));
        }
        Ok(())
    }

    fn call(&mut self, name: &str, args: &[Expression]) -> Result<Flow> {
        let sub_line = self.link(Slot::Target)?;
        let params = match self.statement_at(sub_line)? {
            Statement::Sub(_, params) => params,
            _ => return Err(error!(InternalError; "CALL is not linked to a SUB")),
        };
        if params.len() != args.len() {
            return Err(error!(IllegalFunctionCall; format!(
                "SUB {} expects {} argument(s), got {}",
                name,
                params.len(),
                args.len()
            )));
        }
        let mut scope = Scope::new();
        for (param, arg) in params.iter().zip(args) {
            self.bind_param(&mut scope, param, arg)?;
        }
        self.check_call_depth()?;
        self.ctx.calls.push(CallFrame {
            return_to: self.line + 1,
            sub_line,
            loop_depth: self.ctx.loops.len(),
            try_depth: self.ctx.tries.len(),
        })?;
        self.ctx.vars.push_frame(scope);
        Ok(Flow::Jump(sub_line + 1))
    }

    fn bind_param(&mut self, scope: &mut Scope, param: &Param, arg: &Expression) -> Result<()> {
        if param.array {
            let ident = match arg {
                Expression::Var(Variable::Array(ident)) | Expression::Var(Variable::Unary(ident)) => ident,
                _ => return Err(error!(TypeMismatch; format!("{} needs an array argument", param.ident))),
            };
            if param.by_ref {
                scope.bind_array(&param.ident, self.ctx.vars.locate_array(ident));
            } else {
                match self.ctx.vars.array(ident) {
                    Some(array) => scope.local_array(&param.ident, array.clone()),
                    None => {
                        return Err(error!(TypeMismatch; format!("{} is not an array", ident)))
                    }
                }
            }
            return Ok(());
        }
        if param.by_ref {
            match arg {
                Expression::Var(Variable::Unary(ident)) => {
                    scope.bind(&param.ident, self.ctx.vars.locate(ident));
                    return Ok(());
                }
                Expression::Var(Variable::Member(ident, member)) => {
                    let ident = member_ident(ident, member);
                    scope.bind(&param.ident, self.ctx.vars.locate(&ident));
                    return Ok(());
                }
                _ => {}
            }
        }
        let val = self.eval(arg)?;
        scope.local(&param.ident, val)
    }

    fn end_sub(&mut self) -> Result<Flow> {
        if self.ctx.calls.is_empty() {
            return Err(error!(IllegalFunctionCall; "END SUB without CALL"));
        }
        let frame = self.ctx.calls.pop()?;
        self.ctx.loops.truncate(frame.loop_depth);
        self.ctx.tries.truncate(frame.try_depth);
        self.ctx.vars.pop_frame();
        Ok(Flow::Jump(frame.return_to))
    }

    fn enter_try(&mut self) -> Result<Flow> {
        if let Some(i) = self.try_index(self.line) {
            self.ctx.tries.truncate(i);
        }
        let frame = TryFrame {
            try_line: self.line,
            state: TryState::InTry,
            pending: None,
            loop_depth: self.ctx.loops.len(),
            call_depth: self.ctx.calls.len(),
            gosub_depth: self.ctx.gosubs.len(),
            var_depth: self.ctx.vars.depth(),
        };
        self.ctx.tries.push(frame)?;
        Ok(Flow::Continue)
    }

    /// Index of the active frame for the TRY at `try_line` within the
    /// current SUB.
    fn try_index(&self, try_line: Address) -> Option<usize> {
        let base = self.ctx.calls.last().map_or(0, |f| f.try_depth);
        self.ctx
            .tries
            .rposition(|f| f.try_line == try_line)
            .filter(|i| *i >= base)
    }

    fn end_try(&mut self) -> Result<Flow> {
        let opener = self.link(Slot::Opener)?;
        if let Some(i) = self.try_index(opener) {
            let pending = self.ctx.tries.iter().nth(i).and_then(|f| f.pending.clone());
            self.ctx.tries.truncate(i);
            if let Some(e) = pending {
                return Err(e);
            }
        }
        Ok(Flow::Continue)
    }

    /// Routes an error to the innermost TRY that can take it. Returns the
    /// address to continue at, or the error when nothing catches it.
    pub fn raise(&mut self, error: Error) -> std::result::Result<Address, Error> {
        let error = match error.line_number() {
            Some(_) => error,
            None => error.in_line_number(Some(self.line)),
        };
        self.drop_stale_tries(self.line);
        loop {
            let (try_line, state) = match self.ctx.tries.last() {
                Some(frame) => (frame.try_line, frame.state),
                None => return Err(error),
            };
            let links = self.program.links();
            let catch = links.get(try_line, Slot::Catch);
            let finally = links.get(try_line, Slot::Finally);
            let target = match state {
                TryState::InTry => match (catch, finally) {
                    (Some(c), _) => Some((c, TryState::InCatch)),
                    (None, Some(f)) => Some((f, TryState::InFinally)),
                    (None, None) => None,
                },
                TryState::InCatch => finally.map(|f| (f, TryState::InFinally)),
                TryState::InFinally => None,
            };
            let (line, state) = match target {
                Some(t) => t,
                None => {
                    self.ctx.tries.pop()?;
                    continue;
                }
            };
            self.unwind()?;
            if let Some(frame) = self.ctx.tries.last_mut() {
                frame.state = state;
                if state == TryState::InFinally {
                    frame.pending = Some(error.clone());
                }
            }
            if state == TryState::InCatch {
                if let Statement::Catch(Some(var)) = self.statement_at(line)? {
                    self.ctx.vars.store(var, Val::String(raw_message(&error).into()))?;
                }
            }
            return Ok(line + 1);
        }
    }

    /// Drops TRY frames the program left without passing END TRY: by a
    /// jump from their own SUB or GOSUB level to an address outside the
    /// block, or by returning from the level that opened them.
    pub fn drop_stale_tries(&mut self, at: Address) {
        while let Some(frame) = self.ctx.tries.last() {
            let calls = self.ctx.calls.len();
            let gosubs = self.ctx.gosubs.len();
            let returned = frame.call_depth > calls || frame.gosub_depth > gosubs;
            let same_level = frame.call_depth == calls && frame.gosub_depth == gosubs;
            let outside = match self.program.links().get(frame.try_line, Slot::End) {
                Some(end) => at < frame.try_line || at > end,
                None => false,
            };
            if !(returned || (same_level && outside)) {
                break;
            }
            let depth = self.ctx.tries.len() - 1;
            self.ctx.tries.truncate(depth);
        }
    }

    /// Restores the stacks to the state the innermost TRY saw.
    fn unwind(&mut self) -> Result<()> {
        let frame = match self.ctx.tries.last() {
            Some(f) => f.clone(),
            None => return Err(error!(InternalError; "no TRY to unwind to")),
        };
        self.ctx.loops.truncate(frame.loop_depth);
        self.ctx.calls.truncate(frame.call_depth);
        self.ctx.gosubs.truncate(frame.gosub_depth);
        self.ctx.vars.truncate_frames(frame.var_depth);
        Ok(())
    }

    fn sort(&mut self, ident: &Ident, descending: bool) -> Result<Flow> {
        let mut array = match self.ctx.vars.array(ident) {
            Some(array) => array.clone(),
            None => return Err(error!(SubscriptOutOfRange; format!("{} is not dimensioned", ident))),
        };
        if array.dimensions() != 1 {
            return Err(error!(TypeMismatch; "SORT needs a one-dimensional array"));
        }
        let values = array.values_mut();
        if values.iter().all(|v| matches!(v, Val::String(_))) {
            values.sort_by(|a, b| a.to_string().cmp(&b.to_string()));
        } else if values
            .iter()
            .all(|v| matches!(v, Val::Integer(_) | Val::Real(_) | Val::Boolean(_)))
        {
            let mut keyed = vec![];
            for v in values.iter() {
                keyed.push((v.to_f64()?, v.clone()));
            }
            keyed.sort_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal));
            for (slot, (_, v)) in values.iter_mut().zip(keyed) {
                *slot = v;
            }
        } else {
            return Err(error!(TypeMismatch; "SORT: cannot mix strings and numbers"));
        }
        if descending {
            values.reverse();
        }
        self.ctx.vars.set_array(ident, array);
        Ok(Flow::Continue)
    }

    pub fn show(&mut self, tab: Tab) {
        if self.ctx.active_tab != tab {
            self.ctx.active_tab = tab;
            if let Some(tabs) = self.devices.tabs.as_mut() {
                tabs.request_switch(tab);
            }
        }
    }
}

fn emit(text: &mut String, column: &mut usize, s: &str) {
    for ch in s.chars() {
        text.push(ch);
        *column = if ch == '\n' { 0 } else { *column + 1 };
    }
}

/// Message of an error without its code or line.
pub fn raw_message(error: &Error) -> String {
    if error.text().is_empty() {
        error.code().name().to_string()
    } else {
        error.text().to_string()
    }
}

/// Member references `p.x` are stored as the flat variable `P.X`.
pub fn member_ident(ident: &Ident, member: &str) -> Ident {
    Ident::new(&format!("{}.{}", ident, member))
}

fn var_ident(var: &Variable) -> Ident {
    match var {
        Variable::Unary(ident) | Variable::Array(ident) | Variable::Index(ident, _) => ident.clone(),
        Variable::Member(ident, member) => member_ident(ident, member),
    }
}

/// Converts one INPUT field for storage in `ident`.
fn input_value(ident: Ident, field: &str) -> Result<Val> {
    if let Ident::String(_) = ident {
        return Ok(Val::String(field.into()));
    }
    if let Ok(n) = field.parse::<i64>() {
        return Ok(Val::Integer(n));
    }
    if let Ok(n) = field.parse::<f64>() {
        return Ok(Val::Real(n));
    }
    match ident {
        Ident::Plain(_) => Ok(Val::String(field.into())),
        _ => Err(error!(TypeMismatch; format!("INPUT: {} is not a number", field))),
    }
}
