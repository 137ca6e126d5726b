use crate::error::{LoadError, VfsError};
use serde_json::{Map, Value};

const DEFAULT_FILE_PERMISSIONS: &str = "rw-r--r--";
const DEFAULT_DIR_PERMISSIONS: &str = "rwxr-xr-x";
const DEFAULT_OWNER: &str = "root";

/// display metadata carried by every node
#[derive(Debug, Clone, PartialEq)]
pub struct NodeMeta {
    pub permissions: String,
    pub owner: String,
    pub modified: Option<String>,
    pub size: Option<u64>,
}

impl NodeMeta {
    fn file() -> Self {
        Self {
            permissions: DEFAULT_FILE_PERMISSIONS.to_string(),
            owner: DEFAULT_OWNER.to_string(),
            modified: None,
            size: None,
        }
    }

    fn dir() -> Self {
        Self {
            permissions: DEFAULT_DIR_PERMISSIONS.to_string(),
            ..Self::file()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum VfsNode {
    File {
        content: String,
        meta: NodeMeta,
    },
    Directory {
        // kept as a vec so listings come out in document order
        children: Vec<(String, VfsNode)>,
        meta: NodeMeta,
    },
}

impl VfsNode {
    pub fn file(content: &str) -> Self {
        VfsNode::File { content: content.to_string(), meta: NodeMeta::file() }
    }

    pub fn dir<N: Into<String>>(children: Vec<(N, VfsNode)>) -> Self {
        VfsNode::Directory {
            children: children.into_iter().map(|(n, c)| (n.into(), c)).collect(),
            meta: NodeMeta::dir(),
        }
    }

    pub fn is_dir(&self) -> bool {
        matches!(self, VfsNode::Directory { .. })
    }

    pub fn meta(&self) -> &NodeMeta {
        match self {
            VfsNode::File { meta, .. } | VfsNode::Directory { meta, .. } => meta,
        }
    }

    /// declared size, or the content length for files
    pub fn size(&self) -> u64 {
        match self {
            VfsNode::File { content, meta } => meta.size.unwrap_or(content.len() as u64),
            VfsNode::Directory { meta, .. } => meta.size.unwrap_or(4096),
        }
    }

    pub fn child(&self, name: &str) -> Option<&VfsNode> {
        match self {
            VfsNode::Directory { children, .. } => {
                children.iter().find(|(n, _)| n == name).map(|(_, node)| node)
            }
            VfsNode::File { .. } => None,
        }
    }
}

/// read-only tree built once from the filesystem document
#[derive(Debug, Clone, PartialEq)]
pub struct VirtualFileSystem {
    root: VfsNode,
}

impl VirtualFileSystem {
    pub fn new(root: VfsNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &VfsNode {
        &self.root
    }

    /// walk from the root one child lookup per segment. a file in the
    /// middle of the path is a miss, same as a missing name
    pub fn resolve<S: AsRef<str>>(&self, segments: &[S]) -> Result<&VfsNode, VfsError> {
        let mut node = &self.root;
        for seg in segments {
            node = node.child(seg.as_ref()).ok_or_else(|| VfsError::NotFound(join(segments)))?;
        }
        Ok(node)
    }

    pub fn list_children<'a>(&self, node: &'a VfsNode) -> Result<&'a [(String, VfsNode)], VfsError> {
        match node {
            VfsNode::Directory { children, .. } => Ok(children),
            VfsNode::File { .. } => Err(VfsError::NotADirectory(String::new())),
        }
    }

    pub fn get_content<'a>(&self, node: &'a VfsNode) -> Result<&'a str, VfsError> {
        match node {
            VfsNode::File { content, .. } => Ok(content),
            VfsNode::Directory { .. } => Err(VfsError::NotAFile(String::new())),
        }
    }
}

fn join<S: AsRef<str>>(segments: &[S]) -> String {
    segments.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join("/")
}

/// parse the filesystem document. accepts the bare tree or the
/// `{success, data}` wrapper the api sends; `_metadata` style keys are skipped
pub fn load_document(raw: &str) -> Result<VirtualFileSystem, LoadError> {
    let value: Value = serde_json::from_str(raw)?;
    let tree = match &value {
        Value::Object(obj) if obj.contains_key("success") => {
            if obj.get("success").and_then(Value::as_bool) == Some(false) {
                return Err(LoadError::malformed("$", "server reported success=false"));
            }
            obj.get("data").ok_or_else(|| LoadError::malformed("$", "missing data"))?
        }
        other => other,
    };
    let obj = tree
        .as_object()
        .ok_or_else(|| LoadError::malformed("$", "root must be an object"))?;
    let children = children_from_map("$", obj)?;
    log::info!("vfs: loaded {} root entries", children.len());
    Ok(VirtualFileSystem::new(VfsNode::Directory { children, meta: NodeMeta::dir() }))
}

fn children_from_map(path: &str, obj: &Map<String, Value>) -> Result<Vec<(String, VfsNode)>, LoadError> {
    let mut children = Vec::with_capacity(obj.len());
    for (name, value) in obj {
        if name.starts_with('_') {
            continue;
        }
        let child_path = format!("{}.{}", path, name);
        children.push((name.clone(), node_from_value(&child_path, value)?));
    }
    Ok(children)
}

fn node_from_value(path: &str, value: &Value) -> Result<VfsNode, LoadError> {
    let obj = value
        .as_object()
        .ok_or_else(|| LoadError::malformed(path, "node must be an object"))?;

    // older documents leave out "type"; infer it from the payload
    let kind = match obj.get("type") {
        Some(Value::String(t)) => t.as_str(),
        Some(_) => return Err(LoadError::malformed(path, "type must be a string")),
        None if obj.contains_key("content") => "file",
        None => "directory",
    };

    let text = |key: &str| obj.get(key).and_then(Value::as_str).map(str::to_string);
    let mut meta = match kind {
        "file" => NodeMeta::file(),
        "directory" => NodeMeta::dir(),
        other => return Err(LoadError::malformed(path, format!("unknown node type '{}'", other))),
    };
    if let Some(p) = text("permissions") {
        meta.permissions = p;
    }
    if let Some(owner) = text("owner").or_else(|| text("user")) {
        meta.owner = owner;
    }
    meta.modified = text("modified");
    meta.size = obj.get("size").and_then(Value::as_u64);

    if kind == "file" {
        let content = match obj.get("content") {
            Some(Value::String(c)) => c.clone(),
            None | Some(Value::Null) => String::new(),
            Some(_) => return Err(LoadError::malformed(path, "content must be a string")),
        };
        return Ok(VfsNode::File { content, meta });
    }

    let children = match obj.get("contents") {
        Some(Value::Object(map)) => children_from_map(path, map)?,
        None | Some(Value::Null) => Vec::new(),
        Some(_) => return Err(LoadError::malformed(path, "contents must be an object")),
    };
    Ok(VfsNode::Directory { children, meta })
}
