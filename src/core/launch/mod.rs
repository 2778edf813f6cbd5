pub mod args;
pub mod classpath;
pub mod filter;
pub mod heap;
pub mod jnlp;
pub mod properties;
pub mod task;

pub use args::{assemble_arguments, AssembledArguments, AssemblyInput};
pub use classpath::{build_class_source, ClassSource};
pub use filter::ArgumentFilter;
pub use task::{invoke, open_entry_point, shell_escape, ENTRY_POINT};
