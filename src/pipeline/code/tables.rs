//! Reference tables recognised by their vocabulary.
//!
//! Two shapes recur in papers:
//! - tiered thresholds: consecutive rows led by a level name
//!   (`Gold    500    10%`), at least two of them;
//! - ID/date records: a 3-digit ID followed by a date (`245 01/07/2020`),
//!   used by tree-construction exercises.

use crate::output::ReferenceTable;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

static RE_TIER_ROW: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(Bronze|Silver|Gold|Platinum|Diamond|Basic|Standard|Premium|VIP)\b(.*\d.*)$")
        .unwrap()
});

static RE_TITLE_HINT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(?:level|levels|status|tier|tiers|loyalty|table)\b").unwrap());

static RE_CELL_SPLIT: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s*[\t|]\s*|\s{2,}").unwrap());

static RE_ID_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\d{3})\b[\s,;:|\t-]*\(?(\d{1,2}[/.-]\d{1,2}[/.-]\d{2,4})\)?").unwrap()
});

const MIN_ROWS: usize = 2;
const TITLE_WINDOW: usize = 3;

/// Every recognised table in the section, tier tables first.
pub fn extract_tables(lines: &[&str]) -> Vec<ReferenceTable> {
    let mut tables = tier_tables(lines);
    if let Some(records) = id_date_table(lines) {
        tables.push(records);
    }
    debug!("Found {} reference tables", tables.len());
    tables
}

fn split_cells(line: &str) -> Vec<String> {
    RE_CELL_SPLIT
        .split(line.trim())
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(String::from)
        .collect()
}

fn tier_tables(lines: &[&str]) -> Vec<ReferenceTable> {
    let mut tables = Vec::new();
    let mut i = 0;

    while i < lines.len() {
        if !RE_TIER_ROW.is_match(lines[i]) {
            i += 1;
            continue;
        }
        let start = i;
        while i < lines.len() && RE_TIER_ROW.is_match(lines[i]) {
            i += 1;
        }
        if i - start >= MIN_ROWS {
            tables.push(tier_table(lines, start, i));
        }
    }

    tables
}

fn tier_table(lines: &[&str], start: usize, end: usize) -> ReferenceTable {
    let rows: Vec<Vec<String>> = lines[start..end]
        .iter()
        .map(|line| tier_cells(line))
        .collect();
    let width = rows.iter().map(Vec::len).max().unwrap_or(2);

    let header = start
        .checked_sub(1)
        .map(|h| split_cells(lines[h]))
        .filter(|cells| cells.len() >= 2 && !cells.iter().any(|c| has_digit(c)));
    let title_end = if header.is_some() { start - 1 } else { start };
    let headers = header.unwrap_or_else(|| default_headers(width));

    let title = lines[title_end.saturating_sub(TITLE_WINDOW)..title_end]
        .iter()
        .rev()
        .find(|l| RE_TITLE_HINT.is_match(l))
        .map(|l| l.trim().to_string())
        .unwrap_or_else(|| "Tier thresholds".to_string());

    ReferenceTable {
        title,
        headers,
        rows,
    }
}

fn has_digit(cell: &str) -> bool {
    cell.chars().any(|c| c.is_ascii_digit())
}

fn tier_cells(line: &str) -> Vec<String> {
    let cells = split_cells(line);
    if cells.len() >= 2 {
        return cells;
    }
    match RE_TIER_ROW.captures(line) {
        Some(caps) => vec![caps[1].to_string(), caps[2].trim().to_string()],
        None => cells,
    }
}

fn default_headers(width: usize) -> Vec<String> {
    (0..width.max(2))
        .map(|i| match i {
            0 => "Level".to_string(),
            1 => "Threshold".to_string(),
            n => format!("Column {}", n + 1),
        })
        .collect()
}

/// Every (3-digit ID, date) pair in the section, in document order.
pub fn id_date_pairs(lines: &[&str]) -> Vec<(String, String)> {
    lines
        .iter()
        .flat_map(|&line| RE_ID_DATE.captures_iter(line))
        .map(|caps| (caps[1].to_string(), caps[2].to_string()))
        .collect()
}

fn id_date_table(lines: &[&str]) -> Option<ReferenceTable> {
    let pairs = id_date_pairs(lines);
    if pairs.len() < MIN_ROWS {
        return None;
    }
    Some(ReferenceTable {
        title: "ID and date records".to_string(),
        headers: vec!["ID".to_string(), "Date".to_string()],
        rows: pairs.into_iter().map(|(id, date)| vec![id, date]).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(text: &str) -> Vec<ReferenceTable> {
        let lines: Vec<&str> = text.lines().collect();
        extract_tables(&lines)
    }

    #[test]
    fn test_tier_table_with_header_row() {
        let text = "\
Customer loyalty levels are shown below.
Level    Points needed    Discount
Bronze   0                0%
Silver   500              5%
Gold     1000             10%
10.";
        let found = tables(text);
        assert_eq!(found.len(), 1);
        let t = &found[0];
        assert_eq!(t.title, "Customer loyalty levels are shown below.");
        assert_eq!(t.headers, vec!["Level", "Points needed", "Discount"]);
        assert_eq!(t.rows.len(), 3);
        assert_eq!(t.rows[2], vec!["Gold", "1000", "10%"]);
    }

    #[test]
    fn test_tier_rows_without_header_get_defaults() {
        let found = tables("Basic 10 points\nPremium 50 points\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "Tier thresholds");
        assert_eq!(found[0].headers, vec!["Level", "Threshold"]);
        assert_eq!(found[0].rows[1], vec!["Premium", "50 points"]);
    }

    #[test]
    fn test_single_tier_row_is_not_a_table() {
        assert!(tables("Gold members get 10% off.\nOther text.").is_empty());
    }

    #[test]
    fn test_tier_rows_need_a_number() {
        assert!(tables("Gold\nSilver\nBronze\n").is_empty());
    }

    #[test]
    fn test_tier_names_are_case_sensitive() {
        assert!(tables("gold 1\nsilver 2\n").is_empty());
    }

    #[test]
    fn test_id_date_pairs() {
        let lines = ["245 01/07/2020", "ID 112 (12-03-2019), 389: 5.11.21", "no pair here"];
        let pairs = id_date_pairs(&lines);
        assert_eq!(
            pairs,
            vec![
                ("245".to_string(), "01/07/2020".to_string()),
                ("112".to_string(), "12-03-2019".to_string()),
                ("389".to_string(), "5.11.21".to_string()),
            ]
        );
    }

    #[test]
    fn test_id_date_table_needs_two_pairs() {
        assert!(tables("245 01/07/2020\n").is_empty());
        let found = tables("245 01/07/2020\n112 12/03/2019\n");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].headers, vec!["ID", "Date"]);
        assert_eq!(found[0].rows[1], vec!["112", "12/03/2019"]);
    }

    #[test]
    fn test_four_digit_numbers_are_not_ids() {
        assert!(id_date_pairs(&["2450 01/07/2020", "1234 02/02/2020"]).is_empty());
    }
}
