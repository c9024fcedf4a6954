//! # EduBASIC
//!
//! A structured BASIC for the classroom. Programs are plain text, one
//! statement per line, with block statements instead of line numbers:
//! `IF ... END IF`, `FOR ... NEXT`, `SELECT CASE`, `SUB ... END SUB` and
//! `TRY ... CATCH ... FINALLY ... END TRY`.
//!
//! The [`lang`] module turns source lines into statements and renders them
//! back in canonical form. The [`mach`] module links block statements to
//! each other and steps a program one statement at a time, so a host can
//! run it from a timer, a terminal or a test.
//!
//! ```
//! use basic::mach::{Event, KeyState, Runtime};
//!
//! let mut runtime = Runtime::default();
//! runtime.load("FOR i = 1 TO 2\nPRINT i\nNEXT i").unwrap();
//! let keys = KeyState::new();
//! assert_eq!(runtime.run(&keys, 100), Event::Print("1\n".to_string()));
//! assert_eq!(runtime.run(&keys, 100), Event::Print("2\n".to_string()));
//! assert_eq!(runtime.run(&keys, 100), Event::Ended);
//! ```

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/chapter_1.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_1;

#[path = "doc/chapter_2.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_2;

#[path = "doc/appendix_a.rs"]
#[allow(non_snake_case)]
pub mod ___Appendix_A;

pub mod lang;
pub mod mach;
