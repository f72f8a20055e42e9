mod format;
mod write;

pub use format::format_outputs;
pub use write::{
    descriptor_module_name, scaffold_module_name, write_outputs, GeneratedFile, UnitKind,
    WriteOptions, WriteReport,
};
