use crate::config::types::*;

/// Trait for merging optional configuration values
pub trait Merge<T> {
    fn merge(self, other: T) -> T;
}

impl<T> Merge<Option<T>> for Option<T> {
    fn merge(self, other: Option<T>) -> Option<T> {
        other.or(self)
    }
}

impl Merge<ConfigInput> for ConfigInput {
    fn merge(self, other: ConfigInput) -> ConfigInput {
        ConfigInput {
            objects: match (self.objects, other.objects) {
                (Some(a), Some(b)) => Some(a.merge_with(b)),
                (a, b) => b.or(a),
            },
            diff: match (self.diff, other.diff) {
                (Some(a), Some(b)) => Some(a.merge_with(b)),
                (a, b) => b.or(a),
            },
            output: match (self.output, other.output) {
                (Some(a), Some(b)) => Some(a.merge_with(b)),
                (a, b) => b.or(a),
            },
        }
    }
}

impl ObjectsInput {
    pub fn merge_with(self, other: ObjectsInput) -> ObjectsInput {
        ObjectsInput {
            include: other.include.or(self.include),
            exclude: other.exclude.or(self.exclude),
        }
    }
}

impl DiffInput {
    pub fn merge_with(self, other: DiffInput) -> DiffInput {
        DiffInput {
            on_error: self.on_error.merge(other.on_error),
            report_ambiguous_renames: self
                .report_ambiguous_renames
                .merge(other.report_ambiguous_renames),
        }
    }
}

impl OutputInput {
    pub fn merge_with(self, other: OutputInput) -> OutputInput {
        OutputInput {
            format: self.format.merge(other.format),
        }
    }
}
