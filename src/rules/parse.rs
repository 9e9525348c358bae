use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use super::{RuleSet, RuleSetError, SquareEffect, TileSpec};
use crate::engine::util::Position;

fn parse_value<T: FromStr>(line: usize, key: &str, value: &str) -> Result<T, RuleSetError> {
    value.trim().parse::<T>().map_err(|_| RuleSetError::Parse {
        line,
        message: format!("invalid value {:?} for {}", value, key),
    })
}

fn parse_single_char(line: usize, value: &str) -> Result<char, RuleSetError> {
    let mut chars = value.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(RuleSetError::Parse {
            line,
            message: format!("expected a single character, found {:?}", value),
        }),
    }
}

impl RuleSet {
    /// Parses the `key:value` rule file written by the rule editor.
    ///
    /// Recognized keys are `description`, `rack`, `board`, `bingo`, `validate`,
    /// `flip`, `scoreless`, `star` (`row,col`), one `row` line of multiplier codes
    /// per board row, and one `tile` line per letter (`letter,count,points[,display]`).
    pub fn parse(text: &str) -> Result<Self, RuleSetError> {
        let mut description = String::new();
        let mut board_size = None;
        let mut rack_size = None;
        let mut bingo = None;
        let mut validate = None;
        let mut flip = None;
        let mut scoreless = None;
        let mut star = None;
        let mut rows: Vec<(usize, String)> = Vec::new();
        let mut tiles: Vec<(char, TileSpec)> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let raw = raw.trim();
            if raw.is_empty() || raw.starts_with('#') {
                continue;
            }
            let Some((key, value)) = raw.split_once(':') else {
                return Err(RuleSetError::Parse {
                    line,
                    message: format!("expected key:value, found {:?}", raw),
                });
            };
            let key = key.trim().to_lowercase();

            match key.as_str() {
                "description" => description = value.trim().to_string(),
                "rack" => rack_size = Some(parse_value::<usize>(line, &key, value)?),
                "board" => board_size = Some(parse_value::<usize>(line, &key, value)?),
                "bingo" => bingo = Some(parse_value::<i32>(line, &key, value)?),
                "validate" => validate = Some(parse_value::<bool>(line, &key, value)?),
                "flip" => flip = Some(parse_value::<bool>(line, &key, value)?),
                "scoreless" => scoreless = Some(parse_value::<usize>(line, &key, value)?),
                "star" => {
                    let (row, col) = value.split_once(',').ok_or_else(|| RuleSetError::Parse {
                        line,
                        message: "star must be row,col".into(),
                    })?;
                    star = Some(Position::new(
                        parse_value(line, "star row", row)?,
                        parse_value(line, "star col", col)?,
                    ));
                }
                "row" => rows.push((line, value.trim().to_string())),
                "tile" => {
                    let parts = value.split(',').collect::<Vec<_>>();
                    if parts.len() < 3 || parts.len() > 4 {
                        return Err(RuleSetError::Parse {
                            line,
                            message: "tile must be letter,count,points[,display]".into(),
                        });
                    }
                    let letter = parse_single_char(line, parts[0])?.to_ascii_uppercase();
                    let display = match parts.get(3) {
                        Some(d) => parse_single_char(line, d)?,
                        None => letter,
                    };
                    tiles.push((
                        letter,
                        TileSpec {
                            count: parse_value(line, "tile count", parts[1])?,
                            points: parse_value(line, "tile points", parts[2])?,
                            display,
                        },
                    ));
                }
                other => tracing::warn!("Ignoring unknown rule set key {:?} on line {}", other, line),
            }
        }

        let board_size = board_size.ok_or_else(|| RuleSetError::Invalid("missing board size".into()))?;
        let rack_size = rack_size.ok_or_else(|| RuleSetError::Invalid("missing rack size".into()))?;

        let mut rules = RuleSet::new(&description, board_size, rack_size);
        if let Some(bingo) = bingo {
            rules.bingo_bonus = bingo;
        }
        if let Some(validate) = validate {
            rules.validate_words = validate;
        }
        if let Some(flip) = flip {
            rules.flip = flip;
        }
        if let Some(scoreless) = scoreless {
            rules.scoreless_turn_limit = scoreless;
        }
        if let Some(star) = star {
            rules.star = star;
        }

        if !rows.is_empty() && rows.len() != board_size {
            return Err(RuleSetError::Invalid(format!(
                "expected {} rows, found {}",
                board_size,
                rows.len()
            )));
        }
        for (row, (line, codes)) in rows.iter().enumerate() {
            if codes.chars().count() != board_size {
                return Err(RuleSetError::Parse {
                    line: *line,
                    message: format!("row has {} cells, expected {}", codes.chars().count(), board_size),
                });
            }
            for (col, code) in codes.chars().enumerate() {
                let effect = SquareEffect::from_code(code).ok_or_else(|| RuleSetError::Parse {
                    line: *line,
                    message: format!("unknown multiplier code {:?}", code),
                })?;
                rules.set_multiplier(Position::new(row, col), effect);
            }
        }

        for (letter, spec) in tiles {
            rules.set_tile(letter, spec);
        }

        rules.validate()?;
        Ok(rules)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, RuleSetError> {
        let text = fs::read_to_string(path.as_ref())?;
        let rules = Self::parse(&text)?;
        tracing::info!(
            "Loaded rule set {:?} ({}x{}, {} tiles) from {}",
            rules.description,
            rules.board_size,
            rules.board_size,
            rules.total_tiles(),
            path.as_ref().display()
        );
        Ok(rules)
    }

    /// Serializes the rule set back into the `key:value` file format
    pub fn to_file_string(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = writeln!(out, "description:{}", self.description);
        let _ = writeln!(out, "rack:{}", self.rack_size);
        let _ = writeln!(out, "board:{}", self.board_size);
        let _ = writeln!(out, "bingo:{}", self.bingo_bonus);
        let _ = writeln!(out, "validate:{}", self.validate_words);
        let _ = writeln!(out, "flip:{}", self.flip);
        let _ = writeln!(out, "scoreless:{}", self.scoreless_turn_limit);
        let _ = writeln!(out, "star:{},{}", self.star.row, self.star.col);
        for row in 0..self.board_size {
            let codes: String = (0..self.board_size)
                .map(|col| self.multiplier(Position::new(row, col)).code())
                .collect();
            let _ = writeln!(out, "row:{}", codes);
        }
        for (letter, spec) in self.tiles() {
            let _ = writeln!(
                out,
                "tile:{},{},{},{}",
                letter, spec.count, spec.points, spec.display
            );
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::BLANK;

    const SMALL: &str = "description: Tiny
rack: 2
board: 3
bingo: 20
validate: false
flip: true
star: 1,1
row: T.d
row: .D.
row: d.T
tile: A,3,1
tile: B,2,3,b
tile: ?,1,0
";

    #[test]
    fn test_parse_small_rules() {
        let rules = RuleSet::parse(SMALL).unwrap();
        assert_eq!(rules.description, "Tiny");
        assert_eq!(rules.board_size, 3);
        assert_eq!(rules.rack_size, 2);
        assert_eq!(rules.bingo_bonus, 20);
        assert!(!rules.validate_words);
        assert!(rules.flip);
        assert_eq!(rules.star, Position::new(1, 1));
        assert_eq!(rules.multiplier(Position::new(0, 0)), SquareEffect::TripleWord);
        assert_eq!(rules.multiplier(Position::new(2, 0)), SquareEffect::DoubleLetter);
        assert_eq!(rules.display('B'), 'b');
        assert_eq!(rules.count(BLANK), 1);
        assert_eq!(rules.total_tiles(), 6);
    }

    #[test]
    fn test_file_round_trip() {
        let classic = RuleSet::classic();
        let parsed = RuleSet::parse(&classic.to_file_string()).unwrap();
        assert_eq!(parsed, classic);
    }

    #[test]
    fn test_parse_errors() {
        let bad_value = SMALL.replace("rack: 2", "rack: two");
        assert!(matches!(
            RuleSet::parse(&bad_value),
            Err(RuleSetError::Parse { line: 2, .. })
        ));

        let bad_code = SMALL.replace("row: .D.", "row: .X.");
        assert!(matches!(
            RuleSet::parse(&bad_code),
            Err(RuleSetError::Parse { line: 9, .. })
        ));

        let missing_board = SMALL.replace("board: 3\n", "");
        assert!(matches!(
            RuleSet::parse(&missing_board),
            Err(RuleSetError::Invalid(_))
        ));

        assert!(matches!(
            RuleSet::parse("no separator here"),
            Err(RuleSetError::Parse { line: 1, .. })
        ));
    }
}
