//! Component signatures for tag-form components.
//!
//! `<UserCard name="x"/>` resolves to the function `user_card`. When its
//! parameter list is known, attributes are matched to parameters by name.

use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use weft_core::utils::to_snake_case;

use crate::ast::{Param, Template, TemplateFile};
use crate::parser::parse;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentSignature {
    /// Function path, e.g. `user_card` or `ui::user_card`.
    pub name: String,
    pub params: Vec<Param>,
}

impl ComponentSignature {
    pub fn new(name: impl Into<String>, params: Vec<Param>) -> Self {
        Self {
            name: name.into(),
            params,
        }
    }

    pub fn from_template(template: &Template) -> Self {
        Self::new(template.name.clone(), template.params.clone())
    }

    /// Index of the trailing parameter that collects unmatched attributes.
    pub fn rest_param(&self) -> Option<usize> {
        let last = self.params.len().checked_sub(1)?;
        self.params[last].is_rest().then_some(last)
    }

    /// Parameters matched by attribute name, i.e. all but the rest parameter.
    pub fn named_params(&self) -> &[Param] {
        match self.rest_param() {
            Some(rest) => &self.params[..rest],
            None => &self.params,
        }
    }

    /// Parameter bound by attribute `attr`. `data-id` binds `data_id`.
    pub fn param_index(&self, attr: &str) -> Option<usize> {
        let snake = to_snake_case(attr);
        self.named_params()
            .iter()
            .position(|p| p.name == attr || p.name == snake)
    }
}

pub trait SymbolResolver {
    fn resolve(&self, path: &str) -> Option<&ComponentSignature>;
}

/// Signatures keyed by function path, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ComponentRegistry {
    signatures: IndexMap<String, ComponentSignature>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Templates of `file`, keyed by bare name.
    pub fn from_file(file: &TemplateFile) -> Self {
        let mut registry = Self::new();
        registry.register_file(file, None);
        registry
    }

    /// Add or replace the signature under `key`.
    pub fn insert(&mut self, key: impl Into<String>, signature: ComponentSignature) {
        self.signatures.insert(key.into(), signature);
    }

    /// Register templates of `file` by bare name and, with `module`, also as
    /// `module::name`. Existing entries win.
    pub fn register_file(&mut self, file: &TemplateFile, module: Option<&str>) {
        for template in file.templates() {
            let signature = ComponentSignature::from_template(template);
            if let Some(module) = module {
                self.signatures
                    .entry(format!("{module}::{}", template.name))
                    .or_insert_with(|| signature.clone());
            }
            self.signatures
                .entry(template.name.clone())
                .or_insert(signature);
        }
    }

    /// Entries of `other` not already present.
    pub fn merge(&mut self, other: ComponentRegistry) {
        for (key, signature) in other.signatures {
            self.signatures.entry(key).or_insert(signature);
        }
    }

    pub fn get(&self, path: &str) -> Option<&ComponentSignature> {
        self.signatures.get(path)
    }

    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.signatures.keys().map(String::as_str)
    }
}

impl SymbolResolver for ComponentRegistry {
    fn resolve(&self, path: &str) -> Option<&ComponentSignature> {
        self.get(path)
    }
}

/// Collects signatures from every `.weft` file below a directory.
pub struct DirectoryResolver {
    root: PathBuf,
}

impl DirectoryResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Walk the directory. Only an unreadable root is an error; files that
    /// cannot be read or parsed are skipped.
    pub fn load(&self) -> io::Result<ComponentRegistry> {
        let mut registry = ComponentRegistry::new();
        for path in template_files(&self.root)? {
            load_file(&path, &mut registry);
        }
        log::debug!(
            "resolved {} component signatures under {}",
            registry.len(),
            self.root.display()
        );
        Ok(registry)
    }
}

/// Every `.weft` file below `root`, skipping hidden directories and `target`.
/// Only an unreadable root is an error.
pub fn template_files(root: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    let mut first = true;
    while let Some(dir) = pending.pop() {
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(err) if first => return Err(err),
            Err(err) => {
                log::debug!("skipping {}: {err}", dir.display());
                continue;
            }
        };
        first = false;
        let mut paths: Vec<PathBuf> = entries.filter_map(|e| e.ok().map(|e| e.path())).collect();
        paths.sort();
        for path in paths {
            if path.is_dir() {
                if !is_skipped_dir(&path) {
                    pending.push(path);
                }
            } else if path.extension().is_some_and(|ext| ext == "weft") {
                files.push(path);
            }
        }
    }
    files.sort();
    Ok(files)
}

fn is_skipped_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.') || name == "target")
}

fn load_file(path: &Path, registry: &mut ComponentRegistry) {
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            log::debug!("skipping {}: {err}", path.display());
            return;
        }
    };
    match parse(&source) {
        Ok(file) => registry.register_file(&file, Some(&file.package.name)),
        Err(err) => log::debug!("skipping {}: {err}", path.display()),
    }
}
