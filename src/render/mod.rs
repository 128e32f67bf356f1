mod formatter;

pub use formatter::StepFormatter;
