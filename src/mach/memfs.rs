use super::device::{FileSystem, Handle};
use crate::error;
use crate::lang::ast::FileMode;
use crate::lang::Error;
use std::collections::{BTreeMap, HashMap};

type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone)]
enum Node {
    Dir,
    File(Vec<u8>),
}

#[derive(Debug)]
struct OpenFile {
    path: String,
    mode: FileMode,
    pos: usize,
}

/// ## In-memory file system
///
/// Paths are normalized to absolute form; `.` and `..` segments resolve
/// against the root. The root directory always exists.

#[derive(Debug)]
pub struct MemFs {
    nodes: BTreeMap<String, Node>,
    handles: HashMap<Handle, OpenFile>,
    next_handle: Handle,
}

impl Default for MemFs {
    fn default() -> MemFs {
        let mut nodes = BTreeMap::new();
        nodes.insert("/".to_string(), Node::Dir);
        MemFs {
            nodes,
            handles: HashMap::new(),
            next_handle: 1,
        }
    }
}

fn normalize(path: &str) -> String {
    let mut parts: Vec<&str> = vec![];
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            p => parts.push(p),
        }
    }
    format!("/{}", parts.join("/"))
}

fn parent(path: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(i) => path[..i].to_string(),
    }
}

fn not_found(path: &str) -> Error {
    error!(FileNotFound; format!("{} not found", path))
}

impl MemFs {
    pub fn new() -> MemFs {
        MemFs::default()
    }

    fn file(&self, path: &str) -> Result<&Vec<u8>> {
        match self.nodes.get(path) {
            Some(Node::File(data)) => Ok(data),
            Some(Node::Dir) => Err(error!(BadFileMode; format!("{} is a directory", path))),
            None => Err(not_found(path)),
        }
    }

    fn file_mut(&mut self, path: &str) -> Result<&mut Vec<u8>> {
        match self.nodes.get_mut(path) {
            Some(Node::File(data)) => Ok(data),
            Some(Node::Dir) => Err(error!(BadFileMode; format!("{} is a directory", path))),
            None => Err(not_found(path)),
        }
    }

    fn require_parent(&self, path: &str) -> Result<()> {
        let dir = parent(path);
        match self.nodes.get(&dir) {
            Some(Node::Dir) => Ok(()),
            Some(Node::File(_)) => Err(error!(DiskIoError; format!("{} is not a directory", dir))),
            None => Err(not_found(&dir)),
        }
    }

    fn handle(&self, handle: Handle) -> Result<&OpenFile> {
        match self.handles.get(&handle) {
            Some(f) => Ok(f),
            None => Err(error!(BadFileHandle; format!("file handle {} is not open", handle))),
        }
    }

    fn handle_mut(&mut self, handle: Handle) -> Result<&mut OpenFile> {
        match self.handles.get_mut(&handle) {
            Some(f) => Ok(f),
            None => Err(error!(BadFileHandle; format!("file handle {} is not open", handle))),
        }
    }

    fn children(&self, dir: &str) -> Vec<(String, &Node)> {
        let prefix = if dir == "/" {
            "/".to_string()
        } else {
            format!("{}/", dir)
        };
        self.nodes
            .range(prefix.clone()..)
            .take_while(|(k, _)| k.starts_with(&prefix))
            .filter(|(k, _)| k.len() > prefix.len() && !k[prefix.len()..].contains('/'))
            .map(|(k, n)| (k[prefix.len()..].to_string(), n))
            .collect()
    }
}

impl FileSystem for MemFs {
    fn open(&mut self, path: &str, mode: FileMode) -> Result<Handle> {
        let path = normalize(path);
        let pos = match mode {
            FileMode::Read => {
                self.file(&path)?;
                0
            }
            FileMode::Overwrite => {
                self.require_parent(&path)?;
                if let Some(Node::Dir) = self.nodes.get(&path) {
                    return Err(error!(BadFileMode; format!("{} is a directory", path)));
                }
                self.nodes.insert(path.clone(), Node::File(vec![]));
                0
            }
            FileMode::Append => {
                self.require_parent(&path)?;
                if !self.nodes.contains_key(&path) {
                    self.nodes.insert(path.clone(), Node::File(vec![]));
                }
                self.file(&path)?.len()
            }
        };
        let handle = self.next_handle;
        self.next_handle += 1;
        self.handles.insert(handle, OpenFile { path, mode, pos });
        Ok(handle)
    }

    fn read_bytes(&mut self, handle: Handle, n: usize) -> Result<Vec<u8>> {
        let (path, pos) = {
            let f = self.handle(handle)?;
            if f.mode != FileMode::Read {
                return Err(error!(BadFileMode; "file is not open for READ"));
            }
            (f.path.clone(), f.pos)
        };
        let data = self.file(&path)?;
        let start = pos.min(data.len());
        let end = start.saturating_add(n).min(data.len());
        let bytes = data[start..end].to_vec();
        self.handle_mut(handle)?.pos = end;
        Ok(bytes)
    }

    fn write_bytes(&mut self, handle: Handle, bytes: &[u8]) -> Result<()> {
        let (path, pos) = {
            let f = self.handle(handle)?;
            if f.mode == FileMode::Read {
                return Err(error!(BadFileMode; "file is open for READ"));
            }
            (f.path.clone(), f.pos)
        };
        let data = self.file_mut(&path)?;
        if data.len() < pos {
            data.resize(pos, 0);
        }
        let overlap = (data.len() - pos).min(bytes.len());
        data[pos..pos + overlap].copy_from_slice(&bytes[..overlap]);
        data.extend_from_slice(&bytes[overlap..]);
        self.handle_mut(handle)?.pos = pos + bytes.len();
        Ok(())
    }

    fn seek(&mut self, handle: Handle, pos: u64) -> Result<()> {
        let f = self.handle_mut(handle)?;
        f.pos = pos as usize;
        Ok(())
    }

    fn tell(&self, handle: Handle) -> Result<u64> {
        Ok(self.handle(handle)?.pos as u64)
    }

    fn eof(&self, handle: Handle) -> Result<bool> {
        let f = self.handle(handle)?;
        Ok(f.pos >= self.file(&f.path)?.len())
    }

    fn close(&mut self, handle: Handle) -> Result<()> {
        match self.handles.remove(&handle) {
            Some(_) => Ok(()),
            None => Err(error!(BadFileHandle; format!("file handle {} is not open", handle))),
        }
    }

    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        Ok(self.file(&normalize(path))?.clone())
    }

    fn write_file(&mut self, path: &str, bytes: &[u8]) -> Result<()> {
        let path = normalize(path);
        self.require_parent(&path)?;
        if let Some(Node::Dir) = self.nodes.get(&path) {
            return Err(error!(BadFileMode; format!("{} is a directory", path)));
        }
        self.nodes.insert(path, Node::File(bytes.to_vec()));
        Ok(())
    }

    /// Names in a directory, sorted. Subdirectories end with `/`.
    fn list_dir(&self, path: &str) -> Result<Vec<String>> {
        let path = normalize(path);
        match self.nodes.get(&path) {
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(error!(DiskIoError; format!("{} is not a directory", path)))
            }
            None => return Err(not_found(&path)),
        }
        Ok(self
            .children(&path)
            .into_iter()
            .map(|(name, node)| match node {
                Node::Dir => format!("{}/", name),
                Node::File(_) => name,
            })
            .collect())
    }

    fn mkdir(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        if self.nodes.contains_key(&path) {
            return Err(error!(FileAlreadyExists; format!("{} already exists", path)));
        }
        self.require_parent(&path)?;
        self.nodes.insert(path, Node::Dir);
        Ok(())
    }

    fn rmdir(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        match self.nodes.get(&path) {
            Some(Node::Dir) if path == "/" => {
                return Err(error!(DiskIoError; "cannot remove the root directory"))
            }
            Some(Node::Dir) => {}
            Some(Node::File(_)) => {
                return Err(error!(DiskIoError; format!("{} is not a directory", path)))
            }
            None => return Err(not_found(&path)),
        }
        if !self.children(&path).is_empty() {
            return Err(error!(DiskIoError; format!("{} is not empty", path)));
        }
        self.nodes.remove(&path);
        Ok(())
    }

    fn copy(&mut self, from: &str, to: &str) -> Result<()> {
        let data = self.read_file(from)?;
        self.write_file(to, &data)
    }

    fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let from = normalize(from);
        let to = normalize(to);
        if !self.nodes.contains_key(&from) {
            return Err(not_found(&from));
        }
        if self.nodes.contains_key(&to) {
            return Err(error!(FileAlreadyExists; format!("{} already exists", to)));
        }
        if to.starts_with(&format!("{}/", from)) {
            return Err(error!(DiskIoError; "cannot move a directory into itself"));
        }
        self.require_parent(&to)?;
        let moved: Vec<String> = self
            .nodes
            .keys()
            .filter(|k| **k == from || k.starts_with(&format!("{}/", from)))
            .cloned()
            .collect();
        for key in moved {
            if let Some(node) = self.nodes.remove(&key) {
                let new_key = format!("{}{}", to, &key[from.len()..]);
                self.nodes.insert(new_key, node);
            }
        }
        for f in self.handles.values_mut() {
            if f.path == from {
                f.path = to.clone();
            }
        }
        Ok(())
    }

    fn delete(&mut self, path: &str) -> Result<()> {
        let path = normalize(path);
        self.file(&path)?;
        if self.handles.values().any(|f| f.path == path) {
            return Err(error!(DiskIoError; format!("{} is open", path)));
        }
        self.nodes.remove(&path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    #[test]
    fn test_handles() {
        let mut fs = MemFs::new();
        let h = fs.open("notes.txt", FileMode::Overwrite).unwrap();
        fs.write_bytes(h, b"one\ntwo\n").unwrap();
        fs.close(h).unwrap();
        let h = fs.open("/notes.txt", FileMode::Append).unwrap();
        fs.write_bytes(h, b"three").unwrap();
        assert_eq!(fs.read_bytes(h, 1).unwrap_err().code(), ErrorCode::BadFileMode);
        fs.close(h).unwrap();
        let h = fs.open("./notes.txt", FileMode::Read).unwrap();
        assert_eq!(fs.read_line(h).unwrap(), Some("one".to_string()));
        assert_eq!(fs.tell(h).unwrap(), 4);
        assert_eq!(fs.read_line(h).unwrap(), Some("two".to_string()));
        assert_eq!(fs.read_line(h).unwrap(), Some("three".to_string()));
        assert!(fs.eof(h).unwrap());
        assert_eq!(fs.read_line(h).unwrap(), None);
        fs.seek(h, 0).unwrap();
        assert!(!fs.eof(h).unwrap());
        fs.close(h).unwrap();
        assert_eq!(fs.close(h).unwrap_err().code(), ErrorCode::BadFileHandle);
    }

    #[test]
    fn test_tree() {
        let mut fs = MemFs::new();
        fs.mkdir("docs").unwrap();
        fs.mkdir("docs/old").unwrap();
        fs.write_file("docs/a.txt", b"A").unwrap();
        assert_eq!(fs.list_dir("/docs").unwrap(), vec!["a.txt", "old/"]);
        assert_eq!(fs.rmdir("docs").unwrap_err().code(), ErrorCode::DiskIoError);
        fs.copy("docs/a.txt", "docs/old/b.txt").unwrap();
        fs.rename("docs", "archive").unwrap();
        assert_eq!(fs.read_file("archive/old/b.txt").unwrap(), b"A".to_vec());
        assert_eq!(fs.read_file("docs/a.txt").unwrap_err().code(), ErrorCode::FileNotFound);
        fs.delete("archive/a.txt").unwrap();
        assert_eq!(fs.list_dir("/").unwrap(), vec!["archive/"]);
        assert_eq!(fs.mkdir("x/y").unwrap_err().code(), ErrorCode::FileNotFound);
    }
}
