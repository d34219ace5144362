// src/spec/mod.rs
mod resolver;
mod table;

pub use resolver::{required_fields, required_multi_fields, FieldSet};
pub use table::{
    allowed_field_names, blocks_for, lookup, record_fields, FieldDef, FieldSpec, COMMENT_BLOCK,
    RECORD_BLOCK, SEGMENT_BLOCK, SEGMENT_LIST_BLOCK, SIGNAL_BLOCK,
};
