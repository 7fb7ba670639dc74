//! Per-line text cleanup.
//!
//! Runs on each extracted line before indexing. It rewrites line text but
//! never merges, splits or drops lines, so line numbering always matches the
//! extractor's output.

use regex::Regex;
use unicode_normalization::UnicodeNormalization;

/// Cleanup preset levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CleanupPreset {
    /// Unicode NFC normalization only
    Minimal,
    /// NFC + ligatures + replacement-char removal + trailing whitespace
    #[default]
    Standard,
    /// Standard + NFKC + PUA removal + space-run collapsing
    Aggressive,
}

/// Options for line cleanup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanupOptions {
    /// Normalize Unicode to NFC form
    pub normalize_unicode: bool,

    /// Normalize Unicode to NFKC form (overrides NFC)
    pub compatibility_normalize: bool,

    /// Expand ligatures (fi, fl, etc.)
    pub fix_ligatures: bool,

    /// Remove Private Use Area (PUA) characters
    pub remove_pua: bool,

    /// Remove Unicode replacement character (U+FFFD)
    pub remove_replacement_char: bool,

    /// Trim trailing whitespace
    pub trim_trailing: bool,

    /// Collapse runs of 3+ spaces into one
    pub collapse_spaces: bool,
}

impl CleanupOptions {
    /// Create options from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        match preset {
            CleanupPreset::Minimal => Self::minimal(),
            CleanupPreset::Standard => Self::standard(),
            CleanupPreset::Aggressive => Self::aggressive(),
        }
    }

    /// Minimal cleanup options.
    pub fn minimal() -> Self {
        Self {
            normalize_unicode: true,
            compatibility_normalize: false,
            fix_ligatures: false,
            remove_pua: false,
            remove_replacement_char: false,
            trim_trailing: false,
            collapse_spaces: false,
        }
    }

    /// Standard cleanup options.
    pub fn standard() -> Self {
        Self {
            fix_ligatures: true,
            remove_replacement_char: true,
            trim_trailing: true,
            ..Self::minimal()
        }
    }

    /// Aggressive cleanup options.
    pub fn aggressive() -> Self {
        Self {
            compatibility_normalize: true,
            remove_pua: true,
            collapse_spaces: true,
            ..Self::standard()
        }
    }
}

impl Default for CleanupOptions {
    fn default() -> Self {
        Self::standard()
    }
}

/// Line cleanup pipeline.
pub struct LineCleanup {
    options: CleanupOptions,
    space_run_regex: Regex,
    ligature_map: [(char, &'static str); 7],
}

impl LineCleanup {
    /// Create a new pipeline with the given options.
    pub fn new(options: CleanupOptions) -> Self {
        Self {
            options,
            space_run_regex: Regex::new(r"[ ]{3,}").expect("space-run pattern is valid"),
            ligature_map: [
                ('\u{FB00}', "ff"),
                ('\u{FB01}', "fi"),
                ('\u{FB02}', "fl"),
                ('\u{FB03}', "ffi"),
                ('\u{FB04}', "ffl"),
                ('\u{FB05}', "st"),
                ('\u{FB06}', "st"),
            ],
        }
    }

    /// Create a pipeline from a preset.
    pub fn from_preset(preset: CleanupPreset) -> Self {
        Self::new(CleanupOptions::from_preset(preset))
    }

    /// Clean a single line.
    pub fn apply(&self, line: &str) -> String {
        let mut result = if self.options.compatibility_normalize {
            line.nfkc().collect::<String>()
        } else if self.options.normalize_unicode {
            line.nfc().collect::<String>()
        } else {
            line.to_string()
        };

        // NFKC already decomposes ligatures
        if self.options.fix_ligatures && !self.options.compatibility_normalize {
            for (ligature, replacement) in &self.ligature_map {
                if result.contains(*ligature) {
                    result = result.replace(*ligature, replacement);
                }
            }
        }

        if self.options.remove_pua {
            result.retain(|c| !is_private_use(c));
        }

        if self.options.remove_replacement_char {
            result.retain(|c| c != '\u{FFFD}');
        }

        if self.options.collapse_spaces {
            result = self.space_run_regex.replace_all(&result, " ").to_string();
        }

        if self.options.trim_trailing {
            result.truncate(result.trim_end().len());
        }

        result
    }

    /// Clean every line of a page in place.
    pub fn apply_page(&self, lines: &mut [String]) {
        for line in lines.iter_mut() {
            *line = self.apply(line);
        }
    }
}

impl Default for LineCleanup {
    fn default() -> Self {
        Self::new(CleanupOptions::default())
    }
}

fn is_private_use(c: char) -> bool {
    let code = c as u32;
    (0xE000..=0xF8FF).contains(&code)
        || (0xF0000..=0xFFFFD).contains(&code)
        || (0x100000..=0x10FFFD).contains(&code)
}
