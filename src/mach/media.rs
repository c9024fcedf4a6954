use super::device::Tab;
use super::exec::{Flow, Machine};
use super::Val;
use crate::error;
use crate::lang::ast::{Expression, Point, SetOption, Statement};
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

/// Synopsis shown by HELP for each statement keyword.
const HELP: &[(&str, &str)] = &[
    ("ARC", "ARC AT x, y RADIUS r FROM a1 TO a2 [WITH c]"),
    ("CALL", "CALL name[(args)]"),
    ("CIRCLE", "CIRCLE AT x, y RADIUS r [WITH c] [FILLED]"),
    ("CLS", "CLS"),
    ("COLOR", "COLOR fg [, bg]"),
    ("CONSOLE", "CONSOLE e"),
    ("DIM", "DIM a%[10], m#[3, 4]"),
    ("DO", "DO [WHILE c | UNTIL c] ... LOOP [WHILE c | UNTIL c]"),
    ("EXIT", "EXIT FOR|WHILE|DO|UNTIL|SUB"),
    ("FOR", "FOR v = a TO b [STEP s] ... NEXT [v]"),
    ("GOSUB", "GOSUB label ... RETURN"),
    ("GOTO", "GOTO label"),
    ("IF", "IF c THEN ... [ELSEIF c THEN ...] [ELSE ...] END IF"),
    ("INPUT", "INPUT [\"prompt\";] v [, v]"),
    ("LET", "LET target = expr"),
    ("LINE", "LINE FROM x1, y1 TO x2, y2 [WITH c]"),
    ("OPEN", "OPEN path FOR READ|APPEND|OVERWRITE AS h"),
    ("OVAL", "OVAL AT x, y RADII rx, ry [WITH c] [FILLED]"),
    ("PAINT", "PAINT AT x, y WITH c"),
    ("PLAY", "PLAY voice, macro"),
    ("PRINT", "PRINT [item {; item | , item}] [;|,]"),
    ("PSET", "PSET x, y [WITH c]"),
    ("RANDOMIZE", "RANDOMIZE [seed]"),
    ("RECTANGLE", "RECTANGLE FROM x1, y1 TO x2, y2 [WITH c] [FILLED]"),
    ("SELECT", "SELECT CASE e ... CASE e [, e | e TO e | IS op e] ... END SELECT"),
    ("SET", "SET LINE SPACING|TEXT WRAP|AUDIO ON|OFF"),
    ("SLEEP", "SLEEP milliseconds"),
    ("SORT", "SORT a[] [DESCENDING]"),
    ("SUB", "SUB name[(p, BYREF q, a%[])] ... END SUB"),
    ("TRIANGLE", "TRIANGLE x1, y1, x2, y2, x3, y3 [WITH c] [FILLED]"),
    ("TRY", "TRY ... [CATCH [v$] ...] [FINALLY ...] END TRY"),
    ("TURTLE", "TURTLE commands$"),
    ("UNLESS", "UNLESS c THEN ... END UNLESS"),
    ("UNTIL", "UNTIL c ... UEND"),
    ("VOICE", "VOICE i, preset [WITH a, d, s, r]"),
    ("WHILE", "WHILE c ... WEND"),
];

fn help_text(topic: Option<&str>) -> String {
    match topic {
        None => {
            let names: Vec<&str> = HELP.iter().map(|(k, _)| *k).collect();
            format!("HELP topics: {}", names.join(", "))
        }
        Some(topic) => match HELP.iter().find(|(k, _)| *k == topic) {
            Some((_, synopsis)) => synopsis.to_string(),
            None => format!("no help for {}", topic),
        },
    }
}

impl<'a> Machine<'a> {
    pub fn execute_device(&mut self, statement: &Statement) -> Result<Flow> {
        use Statement::*;
        match statement {
            Help(topic) => {
                let text = help_text(topic.as_deref());
                if let Some(console) = self.devices.console.as_mut() {
                    console.print_output(&text);
                }
                self.show(Tab::Help);
            }
            Console(expr) => {
                let val = self.eval(expr)?;
                if let Some(console) = self.devices.console.as_mut() {
                    console.print_output(&val.to_string());
                }
            }
            Set(SetOption::Audio, on) => self.devices.audio.mute(!on),
            Set(option, on) => self.devices.graphics.set_flag(*option, *on),
            Cls => {
                self.show(Tab::Graphics);
                self.devices.graphics.clear();
            }
            Color(fg, bg) => {
                let fg = self.int(fg)?;
                let bg = match bg {
                    Some(bg) => Some(self.int(bg)?),
                    None => None,
                };
                self.show(Tab::Graphics);
                self.devices.graphics.set_color(fg, bg);
            }
            Pset(p, c) => {
                let (x, y) = self.point(p)?;
                let c = self.color(c)?;
                self.show(Tab::Graphics);
                self.devices.graphics.set_pixel(x, y, c);
            }
            Line(a, b, c) => {
                let (a, b, c) = (self.point(a)?, self.point(b)?, self.color(c)?);
                self.show(Tab::Graphics);
                self.devices.graphics.draw_line(a, b, c);
            }
            Rectangle(a, b, c, filled) => {
                let (a, b, c) = (self.point(a)?, self.point(b)?, self.color(c)?);
                self.show(Tab::Graphics);
                self.devices.graphics.draw_rect(a, b, c, *filled);
            }
            Oval(center, radii, c, filled) => {
                let (center, radii, c) = (self.point(center)?, self.point(radii)?, self.color(c)?);
                self.show(Tab::Graphics);
                self.devices.graphics.draw_oval(center, radii, c, *filled);
            }
            Circle(center, r, c, filled) => {
                let (center, r, c) = (self.point(center)?, self.real(r)?, self.color(c)?);
                self.show(Tab::Graphics);
                self.devices.graphics.draw_circle(center, r, c, *filled);
            }
            Triangle(p, c, filled) => {
                let points = [self.point(&p[0])?, self.point(&p[1])?, self.point(&p[2])?];
                let c = self.color(c)?;
                self.show(Tab::Graphics);
                self.devices.graphics.draw_triangle(points, c, *filled);
            }
            Arc(center, r, from, to, c) => {
                let center = self.point(center)?;
                let r = self.real(r)?;
                let angles = (self.real(from)?, self.real(to)?);
                let c = self.color(c)?;
                self.show(Tab::Graphics);
                self.devices.graphics.draw_arc(center, r, angles, c);
            }
            Paint(p, c) => {
                let (at, c) = (self.point(p)?, self.int(c)?);
                self.show(Tab::Graphics);
                self.devices.graphics.flood_fill(at, c);
            }
            GetSprite(var, a, b) => {
                let (a, b) = (self.point(a)?, self.point(b)?);
                self.show(Tab::Graphics);
                let sprite = self.devices.graphics.get_sprite(a, b);
                self.assign(var, Val::String(sprite.into()))?;
            }
            PutSprite(sprite, at) => {
                let sprite = self.string(sprite)?;
                let at = self.point(at)?;
                self.show(Tab::Graphics);
                self.devices.graphics.put_sprite(&sprite, at);
            }
            Turtle(commands) => {
                let commands = self.string(commands)?;
                self.show(Tab::Graphics);
                self.devices.graphics.turtle(&commands);
            }
            Tempo(bpm) => {
                let bpm = self.real(bpm)?;
                self.devices.audio.set_tempo(bpm);
            }
            Volume(level) => {
                let level = self.real(level)?;
                self.devices.audio.set_volume(level);
            }
            Voice(index, preset, envelope) => {
                let index = self.int(index)?;
                let preset = self.eval(preset)?.to_string();
                let envelope = match envelope {
                    Some(values) => Some(self.envelope(values)?),
                    None => None,
                };
                self.devices.audio.configure_voice(index, &preset, envelope);
            }
            Play(voice, music) => {
                let voice = self.int(voice)?;
                let music = self.string(music)?;
                self.devices.audio.play(voice, &music);
            }
            _ => return Err(error!(InternalError; "not a device statement")),
        }
        Ok(Flow::Continue)
    }

    fn point(&mut self, p: &Point) -> Result<(f64, f64)> {
        Ok((self.real(&p.x)?, self.real(&p.y)?))
    }

    fn color(&mut self, c: &Option<Expression>) -> Result<Option<i64>> {
        match c {
            Some(c) => Ok(Some(self.int(c)?)),
            None => Ok(None),
        }
    }

    fn envelope(&mut self, values: &[Expression]) -> Result<[f64; 4]> {
        if values.len() != 4 {
            return Err(error!(IllegalFunctionCall; format!(
                "VOICE envelope needs 4 values, got {}",
                values.len()
            )));
        }
        let mut env = [0.0; 4];
        for (slot, expr) in env.iter_mut().zip(values) {
            *slot = self.real(expr)?;
        }
        Ok(env)
    }
}
