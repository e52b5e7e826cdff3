// src/legacy/mod.rs
//! Legacy manifest generators
//!
//! Renders the two files older tooling expects inside a source distribution:
//! a `setup.py` for installers that predate PEP 517, and a `PKG-INFO`
//! metadata summary (Metadata-Version 1.1). Both are pure string renderings.

pub mod pyrepr;

use crate::discovery::PackageTree;
use crate::metadata::Metadata;
use crate::requirements::Requirements;
use pyrepr::{repr_str, PyValue};
use std::collections::BTreeMap;

/// How the distribution's code is laid out, as `setup()` needs to know it
#[derive(Debug, Clone, Copy)]
pub enum Layout<'a> {
    /// Package directory with discovered sub-packages and data
    Package(&'a PackageTree),
    /// Single importable `.py` file
    Module(&'a str),
}

/// Reformat entry points from group -> (name -> reference) into
/// group -> sorted `name = reference` lines
pub fn prep_entry_points(
    groups: &BTreeMap<String, BTreeMap<String, String>>,
) -> BTreeMap<String, Vec<String>> {
    groups
        .iter()
        .map(|(group, entries)| {
            let lines = entries
                .iter()
                .map(|(name, reference)| format!("{} = {}", name, reference))
                .collect();
            (group.clone(), lines)
        })
        .collect()
}

/// Render a `setup.py` equivalent to the given metadata
pub fn make_setup_py(
    metadata: &Metadata,
    layout: Layout<'_>,
    requirements: &Requirements,
    entry_points: &BTreeMap<String, Vec<String>>,
) -> String {
    let mut before: Vec<String> = Vec::new();
    let mut extra: Vec<String> = Vec::new();

    match layout {
        Layout::Package(tree) => {
            before.push(assignment("packages", &PyValue::str_list(&tree.packages)));
            before.push(assignment(
                "package_data",
                &PyValue::str_list_dict(&tree.package_data),
            ));
            extra.push("packages=packages,".to_string());
            extra.push("package_data=package_data,".to_string());
        }
        Layout::Module(name) => {
            extra.push(format!("py_modules={},", PyValue::str_list(&[name]).repr()));
        }
    }

    if !requirements.install_requires.is_empty() {
        before.push(assignment(
            "install_requires",
            &PyValue::str_list(&requirements.install_requires),
        ));
        extra.push("install_requires=install_requires,".to_string());
    }
    if !requirements.extras_require.is_empty() {
        before.push(assignment(
            "extras_require",
            &PyValue::str_list_dict(&requirements.extras_require),
        ));
        extra.push("extras_require=extras_require,".to_string());
    }

    if !entry_points.is_empty() {
        before.push(assignment("entry_points", &PyValue::str_list_dict(entry_points)));
        extra.push("entry_points=entry_points,".to_string());
    }

    if let Some(requires_python) = &metadata.requires_python {
        extra.push(format!("python_requires={},", repr_str(requires_python)));
    }

    format!(
        "#!/usr/bin/env python\n\
         # setup.py generated by sdistkit for tools that don't yet use PEP 517\n\
         \n\
         from distutils.core import setup\n\
         \n\
         {before}\n\
         setup(name={name},\n\
         \x20     version={version},\n\
         \x20     description={description},\n\
         \x20     author={author},\n\
         \x20     author_email={author_email},\n\
         \x20     url={url},\n\
         \x20     {extra}\n\
         \x20    )\n",
        before = before.join("\n"),
        name = repr_str(metadata.name()),
        version = repr_str(&metadata.version),
        description = repr_str(&metadata.summary),
        author = repr_str(&metadata.author),
        author_email = repr_str(&metadata.author_email),
        url = repr_str(&metadata.home_page),
        extra = extra.join("\n      "),
    )
}

/// Render the PKG-INFO metadata summary
pub fn make_pkg_info(metadata: &Metadata) -> String {
    format!(
        "Metadata-Version: 1.1\n\
         Name: {}\n\
         Version: {}\n\
         Summary: {}\n\
         Home-page: {}\n\
         Author: {}\n\
         Author-email: {}\n",
        metadata.name(),
        metadata.version,
        metadata.summary,
        metadata.home_page,
        metadata.author,
        metadata.author_email,
    )
}

fn assignment(var: &str, value: &PyValue) -> String {
    format!("{} = \\\n{}\n", var, value.pformat())
}
