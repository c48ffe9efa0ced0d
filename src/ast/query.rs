use serde::{Deserialize, Serialize};

use crate::ast::Command;

/// Complete query pipeline.
///
/// Commands appear in textual order, left to right across `|`. A successfully
/// parsed query always holds at least one command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub commands: Vec<Command>,
}

impl Query {
    pub fn new(commands: Vec<Command>) -> Self {
        Query { commands }
    }
}
