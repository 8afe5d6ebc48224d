use serde::Serialize;

/// Broad role used when a player's position and the slot label are not a
/// direct match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PositionCategory {
    Back,
    Midfield,
    Forward,
    Wing,
}

impl PositionCategory {
    pub const ALL: [PositionCategory; 4] = [
        PositionCategory::Back,
        PositionCategory::Midfield,
        PositionCategory::Forward,
        PositionCategory::Wing,
    ];

    /// Letter a slot label carries for this category ("CB", "CM", "ST", "LW").
    fn label_marker(self) -> char {
        match self {
            PositionCategory::Back => 'b',
            PositionCategory::Midfield => 'm',
            PositionCategory::Forward => 't',
            PositionCategory::Wing => 'w',
        }
    }

    /// Word a natural position carries for this category ("Centre-Back").
    fn position_marker(self) -> &'static str {
        match self {
            PositionCategory::Back => "back",
            PositionCategory::Midfield => "midfield",
            PositionCategory::Forward => "forward",
            PositionCategory::Wing => "wing",
        }
    }

    fn matches(self, position: &str, label: &str) -> bool {
        label.contains(self.label_marker()) && position.contains(self.position_marker())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PositionFit {
    /// Position and label match, or one contains the other
    Natural,
    /// Same broad category
    Category,
    /// No recognizable relation; uncategorized positions land here too
    Unrelated,
}

impl PositionFit {
    /// A missing position is treated as empty, which every label contains.
    pub fn evaluate(position: Option<&str>, slot_label: &str) -> PositionFit {
        let position = position.unwrap_or("").to_lowercase();
        let label = slot_label.to_lowercase();
        if label.is_empty() {
            return PositionFit::Unrelated;
        }

        if position.contains(&label) || label.contains(&position) {
            PositionFit::Natural
        } else if PositionCategory::ALL.iter().any(|c| c.matches(&position, &label)) {
            PositionFit::Category
        } else {
            PositionFit::Unrelated
        }
    }

    pub fn score(self) -> u32 {
        match self {
            PositionFit::Natural => 10,
            PositionFit::Category => 5,
            PositionFit::Unrelated => 0,
        }
    }
}
