use serde::Deserialize;

const INSTANCES_SYMBOLS_EMPTY: char = ' ';

/// Glyph sequences used to show how busy a day is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SymbolSet {
    #[default]
    Minimal,
    Vertical,
    Circles,
    Numbers,
    Roman,
    Binary,
    None,
}

impl SymbolSet {
    pub const ALL: [SymbolSet; 7] = [
        SymbolSet::Minimal,
        SymbolSet::Vertical,
        SymbolSet::Circles,
        SymbolSet::Numbers,
        SymbolSet::Roman,
        SymbolSet::Binary,
        SymbolSet::None,
    ];

    fn values(&self) -> &'static [char] {
        match self {
            SymbolSet::Minimal => &['·', '∶', '∴', '∷', '◇', '◈'],
            SymbolSet::Vertical => &['·', '∶', '⁝', '⁞', '|'],
            SymbolSet::Circles => &['◔', '◑', '◕', '●', '๑'],
            SymbolSet::Numbers => &['1', '2', '3', '4', '5', '6', '7', '8', '9', '+'],
            SymbolSet::Roman => &['Ⅰ', 'Ⅱ', 'Ⅲ', 'Ⅳ', 'Ⅴ', 'Ⅵ', 'Ⅶ', 'Ⅷ', 'Ⅸ', 'Ⅹ', '∾'],
            SymbolSet::Binary => &['☱', '☲', '☳', '☴', '☵', '☶', '☷', '※'],
            SymbolSet::None => &[' '],
        }
    }

    /// Symbol for `instances` occurrences; the last one saturates.
    pub fn get(&self, instances: usize) -> char {
        let values = self.values();
        match instances {
            0 => INSTANCES_SYMBOLS_EMPTY,
            n if n < values.len() => values[n - 1],
            _ => values[values.len() - 1],
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SymbolSet::Minimal => "minimal",
            SymbolSet::Vertical => "vertical",
            SymbolSet::Circles => "circles",
            SymbolSet::Numbers => "numbers",
            SymbolSet::Roman => "roman",
            SymbolSet::Binary => "binary",
            SymbolSet::None => "none",
        }
    }

    pub fn next(&self) -> Self {
        let index = Self::ALL.iter().position(|s| s == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}
