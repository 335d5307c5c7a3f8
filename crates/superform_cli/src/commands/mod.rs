pub mod channels;
pub mod format_title;
pub mod publish;
