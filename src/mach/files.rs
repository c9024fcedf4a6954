use super::exec::{Flow, Machine};
use super::{Array, Val};
use crate::error;
use crate::lang::ast::Statement;
use crate::lang::Error;

type Result<T> = std::result::Result<T, Error>;

impl<'a> Machine<'a> {
    /// File statements. Everything goes through the FileSystem device.
    pub fn execute_file(&mut self, statement: &Statement) -> Result<Flow> {
        use Statement::*;
        match statement {
            Open(path, mode, ident) => {
                let path = self.string(path)?;
                let handle = self.devices.files.open(&path, *mode)?;
                self.ctx.vars.store(ident, Val::Integer(handle))?;
            }
            Close(handle) => {
                let handle = self.int(handle)?;
                self.devices.files.close(handle)?;
            }
            Write(handle, expr) => {
                let handle = self.int(handle)?;
                let text = self.eval(expr)?.to_string();
                self.devices.files.write_bytes(handle, text.as_bytes())?;
            }
            WriteLine(handle, expr) => {
                let handle = self.int(handle)?;
                let mut text = self.eval(expr)?.to_string();
                text.push('\n');
                self.devices.files.write_bytes(handle, text.as_bytes())?;
            }
            ReadLine(handle, var) => {
                let handle = self.int(handle)?;
                let line = self.devices.files.read_line(handle)?.unwrap_or_default();
                self.assign(var, Val::String(line.into()))?;
            }
            Seek(handle, pos) => {
                let handle = self.int(handle)?;
                let pos = self.int(pos)?.max(0) as u64;
                self.devices.files.seek(handle, pos)?;
            }
            ReadFile(var, path) => {
                let path = self.string(path)?;
                let bytes = self.devices.files.read_file(&path)?;
                let text = String::from_utf8_lossy(&bytes).into_owned();
                self.assign(var, Val::String(text.into()))?;
            }
            WriteFile(expr, path) => {
                let text = self.eval(expr)?.to_string();
                let path = self.string(path)?;
                self.devices.files.write_file(&path, text.as_bytes())?;
            }
            ListDir(ident, path) => {
                let path = self.string(path)?;
                let names = self.devices.files.list_dir(&path)?;
                let values = names.into_iter().map(|n| Val::String(n.into())).collect();
                self.ctx.vars.set_array(ident, Array::from_values(values));
            }
            MkDir(path) => {
                let path = self.string(path)?;
                self.devices.files.mkdir(&path)?;
            }
            RmDir(path) => {
                let path = self.string(path)?;
                self.devices.files.rmdir(&path)?;
            }
            Delete(path) => {
                let path = self.string(path)?;
                self.devices.files.delete(&path)?;
            }
            Copy(from, to) => {
                let (from, to) = (self.string(from)?, self.string(to)?);
                self.devices.files.copy(&from, &to)?;
            }
            Move(from, to) => {
                let (from, to) = (self.string(from)?, self.string(to)?);
                self.devices.files.rename(&from, &to)?;
            }
            _ => return Err(error!(InternalError; "not a file statement")),
        }
        Ok(Flow::Continue)
    }
}
