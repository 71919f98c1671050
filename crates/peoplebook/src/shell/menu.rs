//! Menu entries of the interactive shell.

use crate::record::Gender;

/// One numbered menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1) Show data
    ShowData,
    /// 2) Add record
    AddRecord,
    /// 3) Delete record
    DeleteRecord,
    /// 4) Search by Name or Surname
    Search,
    /// 5) Calculate average height
    AverageHeight,
    /// 6) Exit
    Exit,
}

impl MenuChoice {
    /// Every entry in menu order.
    pub const ALL: [Self; 6] = [
        Self::ShowData,
        Self::AddRecord,
        Self::DeleteRecord,
        Self::Search,
        Self::AverageHeight,
        Self::Exit,
    ];

    /// The number the user types to pick this entry.
    #[must_use]
    pub fn number(self) -> u8 {
        match self {
            Self::ShowData => 1,
            Self::AddRecord => 2,
            Self::DeleteRecord => 3,
            Self::Search => 4,
            Self::AverageHeight => 5,
            Self::Exit => 6,
        }
    }

    /// Menu text for this entry. The aggregate entry names `gender`.
    #[must_use]
    pub fn label(self, gender: Gender) -> String {
        match self {
            Self::ShowData => "Show data".to_string(),
            Self::AddRecord => "Add record".to_string(),
            Self::DeleteRecord => "Delete record".to_string(),
            Self::Search => "Search by Name or Surname".to_string(),
            Self::AverageHeight => format!("Calculate average {} height", gender.adjective()),
            Self::Exit => "Exit".to_string(),
        }
    }

    /// Parse the user's answer at the menu prompt.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        Self::ALL
            .into_iter()
            .find(|choice| input == choice.number().to_string())
    }
}

/// Render the full menu block.
#[must_use]
pub fn render(gender: Gender) -> String {
    let mut out = String::from("\nPROGRAM MENU\n");
    for choice in MenuChoice::ALL {
        out.push_str(&format!("{}) {}\n", choice.number(), choice.label(gender)));
    }
    out
}
