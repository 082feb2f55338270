//! Built-in content used when the settings file does not override it.

use crate::crossword::Clue;

pub const DEFAULT_PASSWORD: &str = "happy-birthday";
pub const DEFAULT_TARGET: &str = "2025-10-14T00:00:00-06:00";

pub fn default_clues() -> Vec<Clue> {
    vec![
        Clue::new("The city where it all started", "Antigua"),
        Clue::new("What we order every single morning", "Café"),
        Clue::new("Month of the big day", "October"),
        Clue::new("The dessert we always share", "Tiramisú"),
        Clue::new("What you are to me", "Everything"),
        Clue::new("Our first trip together, by the lake", "Atitlán"),
        Clue::new("Song we danced to, a ___ song", "Love"),
    ]
}

pub fn default_symbols() -> Vec<String> {
    ["♥", "★", "☀", "♫", "✿", "☕", "✈", "☂"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn default_maze() -> Vec<String> {
    [
        "###################",
        "#o.......#.......o#",
        "#.##.###.#.###.##.#",
        "#.................#",
        "#.##.#.#####.#.##.#",
        "#....#...G...#....#",
        "####.###.#.###.####",
        "#....#.G...G.#....#",
        "#.##.#.#####.#.##.#",
        "#........P........#",
        "#.##.###.#.###.##.#",
        "#o.......#.......o#",
        "###################",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chase::Level;
    use crate::crossword::{build_layout, LayoutOptions};

    #[test]
    fn default_maze_parses() {
        let level = Level::parse(&default_maze()).unwrap();
        assert_eq!(level.ghosts.len(), 3);
        assert_eq!(level.power.len(), 4);
        assert!(!level.pellets.is_empty());
    }

    #[test]
    fn default_clues_lay_out() {
        let options = LayoutOptions::default();
        let layout = build_layout(&default_clues(), &options).unwrap();
        assert_eq!(layout.words.len(), default_clues().len());
    }
}
