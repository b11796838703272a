use serde::{Deserialize, Serialize};

/// Heat tier of a single week bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntensityLevel {
    Empty,
    Low,
    Medium,
    High,
    Critical,
}

impl IntensityLevel {
    pub const ALL: [IntensityLevel; 5] = [
        IntensityLevel::Empty,
        IntensityLevel::Low,
        IntensityLevel::Medium,
        IntensityLevel::High,
        IntensityLevel::Critical,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            IntensityLevel::Empty => "empty",
            IntensityLevel::Low => "low",
            IntensityLevel::Medium => "medium",
            IntensityLevel::High => "high",
            IntensityLevel::Critical => "critical",
        }
    }
}

impl std::fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn classify(count: usize) -> IntensityLevel {
    match count {
        0 => IntensityLevel::Empty,
        1..=2 => IntensityLevel::Low,
        3..=5 => IntensityLevel::Medium,
        6..=10 => IntensityLevel::High,
        _ => IntensityLevel::Critical,
    }
}
