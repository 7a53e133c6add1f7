//! The accumulating output of a code-generation pass.

/// Generated source split into drawing statements and static declarations.
///
/// Statements keep their emission order. Declarations are deduplicated by
/// exact string value, so two layers sharing pixel content emit one data
/// table and two drawing statements referencing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBuffer {
    code: Vec<String>,
    declarations: Vec<String>,
}

impl SourceBuffer {
    /// An empty buffer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            code: Vec::new(),
            declarations: Vec::new(),
        }
    }

    /// Append one drawing statement.
    pub fn push_code(&mut self, line: impl Into<String>) {
        self.code.push(line.into());
    }

    /// Append one static declaration, unless an identical one is already
    /// present.
    pub fn push_declaration(&mut self, declaration: impl Into<String>) {
        let declaration = declaration.into();
        if !self.declarations.contains(&declaration) {
            self.declarations.push(declaration);
        }
    }

    /// Drawing statements, in emission order.
    #[must_use]
    pub fn code(&self) -> &[String] {
        &self.code
    }

    /// Unique declarations, in first-emission order.
    #[must_use]
    pub fn declarations(&self) -> &[String] {
        &self.declarations
    }

    /// Whether nothing has been emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.code.is_empty() && self.declarations.is_empty()
    }

    /// Concatenate declarations, a blank separator, then statements.
    #[must_use]
    pub fn assemble(&self) -> String {
        let mut out = String::new();
        for declaration in &self.declarations {
            out.push_str(declaration);
            out.push('\n');
        }
        if !self.declarations.is_empty() && !self.code.is_empty() {
            out.push('\n');
        }
        for line in &self.code {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
