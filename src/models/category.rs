/// An entry of the selector menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Key into the question bank.
    pub id: &'static str,
    pub label: &'static str,
    pub icon: &'static str,
}

/// The fixed selector menu. Identifiers need not all exist in the bank.
pub const CATEGORIES: [Category; 6] = [
    Category { id: "A", label: "Quiz A", icon: "🎯" },
    Category { id: "B", label: "Quiz B", icon: "🎲" },
    Category { id: "C", label: "Quiz C", icon: "🎪" },
    Category { id: "D", label: "Quiz D", icon: "🎨" },
    Category { id: "E", label: "Quiz E", icon: "🎭" },
    Category { id: "F", label: "Quiz F", icon: "🎪" },
];
