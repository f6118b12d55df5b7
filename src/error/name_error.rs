/// A name that could not be resolved anywhere on the scope chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NameError {
    /// No variable with this name is visible.
    #[error("Unresolved variable '{name}'.")]
    Variable {
        /// The name that was looked up.
        name: String,
    },
    /// No function with this name and arity is visible.
    #[error("Unresolved function '{name}/{arity}'.")]
    Function {
        /// The name that was looked up.
        name:  String,
        /// The number of arguments of the call.
        arity: usize,
    },
    /// The type (or runtime kind) has no member table.
    #[error("Type '{type_name}' has no members.")]
    Members {
        /// Name of the type whose members were requested.
        type_name: String,
    },
}
