//! Source unit builder.
//!
//! [`SourceWriter`] collects the parts of one generated class, interface or
//! enum and renders them as text. Rendering is a pure function of the
//! collected parts: usings keep first-seen order with duplicates dropped,
//! members render in a fixed section order (event, fields, constructor,
//! properties, methods), and lines end with `\n`.
//!
//! ## Layout
//!
//! ```text
//! // <auto-generated>
//! //     ...
//! // </auto-generated>
//!
//! namespace Shop.Entities
//! {
//!     using System;
//!
//!     [Attribute]
//!     public partial class Country : IEntity
//!     {
//!         public string Name { get; set; }
//!     }
//! }
//! ```

use scaffold_define::is_reserved_keyword;

const HEADER: &str = "// <auto-generated>\n//     This code was generated by scaffold-gen. Changes to this file will be lost when the code is regenerated.\n// </auto-generated>\n";

const INDENT: &str = "    ";

/// The kind of unit being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Class,
    Interface,
    Enum,
}

/// A constructor-injected dependency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dependency {
    pub ty: String,
    pub name: String,
    /// Passed to `base(...)` instead of being stored in a field.
    pub forward_to_base: bool,
}

/// A property with optional initializer and attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub ty: String,
    pub name: String,
    pub initializer: Option<String>,
    pub attributes: Vec<String>,
}

impl Property {
    pub fn new(ty: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            ty: ty.into(),
            name: name.into(),
            initializer: None,
            attributes: vec![],
        }
    }

    pub fn initialized(mut self, initializer: impl Into<String>) -> Self {
        self.initializer = Some(initializer.into());
        self
    }

    pub fn with_attributes(mut self, attributes: &[String]) -> Self {
        self.attributes.extend(attributes.iter().cloned());
        self
    }
}

/// A method. Without a body it renders as a declaration (`...;`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub signature: String,
    pub attributes: Vec<String>,
    pub body: Option<Vec<String>>,
}

impl Method {
    pub fn declaration(signature: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            attributes: vec![],
            body: None,
        }
    }

    pub fn with_body(signature: impl Into<String>, body: Vec<String>) -> Self {
        Self {
            signature: signature.into(),
            attributes: vec![],
            body: Some(body),
        }
    }

    pub fn attribute(mut self, attribute: impl Into<String>) -> Self {
        self.attributes.push(attribute.into());
        self
    }
}

/// Builder for one source unit.
#[derive(Debug, Clone)]
pub struct SourceWriter {
    kind: UnitKind,
    namespace: String,
    name: String,
    usings: Vec<String>,
    attributes: Vec<String>,
    inheritance: Vec<String>,
    dependencies: Vec<Dependency>,
    constructor_lines: Vec<String>,
    properties: Vec<Property>,
    methods: Vec<Method>,
    members: Vec<(String, String)>,
    notify_property_changes: bool,
}

impl SourceWriter {
    fn new(kind: UnitKind, namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind,
            namespace: namespace.into(),
            name: name.into(),
            usings: vec![],
            attributes: vec![],
            inheritance: vec![],
            dependencies: vec![],
            constructor_lines: vec![],
            properties: vec![],
            methods: vec![],
            members: vec![],
            notify_property_changes: false,
        }
    }

    /// A `public partial class`.
    pub fn class(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(UnitKind::Class, namespace, name)
    }

    /// A `public partial interface`.
    pub fn interface(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(UnitKind::Interface, namespace, name)
    }

    /// A `public enum`. Enums cannot be partial.
    pub fn enumeration(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(UnitKind::Enum, namespace, name)
    }

    /// Adds a using directive. Empty and repeated namespaces are ignored.
    pub fn using(&mut self, namespace: impl AsRef<str>) -> &mut Self {
        let namespace = namespace.as_ref().trim();
        if !namespace.is_empty()
            && namespace != self.namespace
            && !self.usings.iter().any(|u| u == namespace)
        {
            self.usings.push(namespace.to_string());
        }
        self
    }

    pub fn usings<I, S>(&mut self, namespaces: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for namespace in namespaces {
            self.using(namespace);
        }
        self
    }

    /// Adds a unit attribute. Surrounding brackets are optional; repeats are ignored.
    pub fn attribute(&mut self, attribute: impl AsRef<str>) -> &mut Self {
        let attribute = normalize_attribute(attribute.as_ref());
        if !attribute.is_empty() && !self.attributes.contains(&attribute) {
            self.attributes.push(attribute);
        }
        self
    }

    pub fn attributes<I, S>(&mut self, attributes: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for attribute in attributes {
            self.attribute(attribute);
        }
        self
    }

    /// Appends a base type or implemented interface.
    pub fn inherit(&mut self, ty: impl Into<String>) -> &mut Self {
        self.inheritance.push(ty.into());
        self
    }

    pub fn dependency(
        &mut self,
        ty: impl Into<String>,
        name: impl Into<String>,
        forward_to_base: bool,
    ) -> &mut Self {
        self.dependencies.push(Dependency {
            ty: ty.into(),
            name: name.into(),
            forward_to_base,
        });
        self
    }

    /// Appends a statement to the end of the constructor body.
    pub fn constructor_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.constructor_lines.push(line.into());
        self
    }

    pub fn property(&mut self, property: Property) -> &mut Self {
        self.properties.push(property);
        self
    }

    pub fn method(&mut self, method: Method) -> &mut Self {
        self.methods.push(method);
        self
    }

    /// Adds an enum member bound to `value`.
    pub fn member(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.members.push((name.into(), value.into()));
        self
    }

    /// Makes properties raise `PropertyChanged` when their value changes.
    pub fn notify_property_changes(&mut self, enabled: bool) -> &mut Self {
        self.notify_property_changes = enabled;
        self
    }

    fn notifies(&self) -> bool {
        self.notify_property_changes && self.kind == UnitKind::Class
    }

    /// Renders the unit.
    pub fn render(&self) -> String {
        let mut usings = self.usings.clone();
        let mut inheritance = self.inheritance.clone();
        if self.notifies() {
            for extra in ["System.ComponentModel", "System.Runtime.CompilerServices"] {
                if !usings.iter().any(|u| u == extra) {
                    usings.push(extra.to_string());
                }
            }
            inheritance.push("INotifyPropertyChanged".to_string());
        }

        let mut out = String::with_capacity(1024);
        out.push_str(HEADER);
        out.push('\n');
        out.push_str(&format!("namespace {}\n{{\n", self.namespace));

        if !usings.is_empty() {
            for using in &usings {
                out.push_str(&format!("{INDENT}using {using};\n"));
            }
            out.push('\n');
        }

        for attribute in &self.attributes {
            out.push_str(&format!("{INDENT}[{attribute}]\n"));
        }

        let keyword = match self.kind {
            UnitKind::Class => "public partial class",
            UnitKind::Interface => "public partial interface",
            UnitKind::Enum => "public enum",
        };
        out.push_str(&format!("{INDENT}{keyword} {}", self.name));
        if !inheritance.is_empty() {
            out.push_str(&format!(" : {}", inheritance.join(", ")));
        }
        out.push('\n');
        out.push_str(&format!("{INDENT}{{\n"));

        let blocks = match self.kind {
            UnitKind::Enum => self.enum_blocks(),
            _ => self.member_blocks(),
        };
        let rendered: Vec<String> = blocks
            .iter()
            .map(|block| {
                block
                    .iter()
                    .map(|line| {
                        if line.is_empty() {
                            "\n".to_string()
                        } else {
                            format!("{INDENT}{INDENT}{line}\n")
                        }
                    })
                    .collect()
            })
            .collect();
        out.push_str(&rendered.join("\n"));

        out.push_str(&format!("{INDENT}}}\n}}\n"));
        out
    }

    fn enum_blocks(&self) -> Vec<Vec<String>> {
        if self.members.is_empty() {
            return vec![];
        }
        vec![
            self.members
                .iter()
                .map(|(name, value)| format!("{name} = {value},"))
                .collect(),
        ]
    }

    fn member_blocks(&self) -> Vec<Vec<String>> {
        let mut blocks = Vec::new();

        if self.notifies() {
            blocks.push(vec![
                "public event PropertyChangedEventHandler PropertyChanged;".to_string(),
            ]);
        }

        let stored: Vec<String> = self
            .dependencies
            .iter()
            .filter(|d| !d.forward_to_base)
            .map(|d| format!("private readonly {} {};", d.ty, d.name))
            .collect();
        if !stored.is_empty() {
            blocks.push(stored);
        }

        if self.kind == UnitKind::Class
            && (!self.dependencies.is_empty() || !self.constructor_lines.is_empty())
        {
            blocks.push(self.constructor_block());
        }

        for property in &self.properties {
            if self.notifies() {
                blocks.extend(notifying_property_blocks(property));
            } else {
                blocks.push(auto_property_block(property, self.kind));
            }
        }

        for method in &self.methods {
            blocks.push(method_block(method));
        }

        if self.notifies() {
            blocks.push(vec![
                "protected void OnPropertyChanged([CallerMemberName] string propertyName = null)"
                    .to_string(),
                "{".to_string(),
                format!(
                    "{INDENT}this.PropertyChanged?.Invoke(this, new PropertyChangedEventArgs(propertyName));"
                ),
                "}".to_string(),
            ]);
        }

        blocks
    }

    fn constructor_block(&self) -> Vec<String> {
        let params: Vec<String> = self
            .dependencies
            .iter()
            .map(|d| format!("{} {}", d.ty, d.name))
            .collect();
        let mut block = vec![format!("public {}({})", self.name, params.join(", "))];

        let forwarded: Vec<&str> = self
            .dependencies
            .iter()
            .filter(|d| d.forward_to_base)
            .map(|d| d.name.as_str())
            .collect();
        if !forwarded.is_empty() {
            block.push(format!("{INDENT}: base({})", forwarded.join(", ")));
        }

        block.push("{".to_string());
        for dependency in self.dependencies.iter().filter(|d| !d.forward_to_base) {
            block.push(format!(
                "{INDENT}this.{name} = {name};",
                name = dependency.name
            ));
        }
        for line in &self.constructor_lines {
            block.push(format!("{INDENT}{line}"));
        }
        block.push("}".to_string());
        block
    }
}

fn attribute_lines(attributes: &[String]) -> impl Iterator<Item = String> + '_ {
    attributes
        .iter()
        .map(|a| normalize_attribute(a))
        .filter(|a| !a.is_empty())
        .map(|a| format!("[{a}]"))
}

fn auto_property_block(property: &Property, kind: UnitKind) -> Vec<String> {
    let mut block: Vec<String> = attribute_lines(&property.attributes).collect();
    let visibility = if kind == UnitKind::Interface { "" } else { "public " };
    let mut line = format!("{visibility}{} {} {{ get; set; }}", property.ty, property.name);
    if let Some(initializer) = &property.initializer {
        line.push_str(&format!(" = {initializer};"));
    }
    block.push(line);
    block
}

fn notifying_property_blocks(property: &Property) -> [Vec<String>; 2] {
    let field = backing_field_name(&property.name);
    let declaration = match &property.initializer {
        Some(initializer) => format!("private {} {field} = {initializer};", property.ty),
        None => format!("private {} {field};", property.ty),
    };

    let mut accessor: Vec<String> = attribute_lines(&property.attributes).collect();
    accessor.extend([
        format!("public {} {}", property.ty, property.name),
        "{".to_string(),
        format!("{INDENT}get => this.{field};"),
        format!("{INDENT}set"),
        format!("{INDENT}{{"),
        format!("{INDENT}{INDENT}if (!Equals(this.{field}, value))"),
        format!("{INDENT}{INDENT}{{"),
        format!("{INDENT}{INDENT}{INDENT}this.{field} = value;"),
        format!("{INDENT}{INDENT}{INDENT}this.OnPropertyChanged();"),
        format!("{INDENT}{INDENT}}}"),
        format!("{INDENT}}}"),
        "}".to_string(),
    ]);

    [vec![declaration], accessor]
}

fn method_block(method: &Method) -> Vec<String> {
    let mut block: Vec<String> = attribute_lines(&method.attributes).collect();
    match &method.body {
        None => block.push(format!("{};", method.signature)),
        Some(body) => {
            block.push(method.signature.clone());
            block.push("{".to_string());
            block.extend(body.iter().map(|line| format!("{INDENT}{line}")));
            block.push("}".to_string());
        }
    }
    block
}

/// Strips optional surrounding brackets from a schema-supplied attribute.
fn normalize_attribute(attribute: &str) -> String {
    let trimmed = attribute.trim();
    trimmed
        .strip_prefix('[')
        .and_then(|inner| inner.strip_suffix(']'))
        .unwrap_or(trimmed)
        .trim()
        .to_string()
}

/// Backing field for a notifying property: camelCase, `@`-escaped when reserved.
///
/// A property that is already camelCase gets an `_` prefix so the field
/// never shares the property's spelling.
///
/// ```
/// use scaffold_gen::writer::backing_field_name;
///
/// assert_eq!(backing_field_name("CountryId"), "countryId");
/// assert_eq!(backing_field_name("Event"), "@event");
/// assert_eq!(backing_field_name("name"), "_name");
/// ```
pub fn backing_field_name(property: &str) -> String {
    let mut chars = property.chars();
    let camel = match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect::<String>(),
        None => String::new(),
    };
    if camel == property {
        format!("_{camel}")
    } else if is_reserved_keyword(&camel) {
        format!("@{camel}")
    } else {
        camel
    }
}
