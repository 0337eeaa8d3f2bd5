//! Result ordering.

use std::cmp::Ordering;

use super::types::{SortKey, SortOrder, TorrentCandidate};

/// Sort candidates by `key`. Stable in both directions: `Desc` reverses the
/// ascending comparator, so equal elements keep their input order.
pub fn sort_candidates(
    mut candidates: Vec<TorrentCandidate>,
    key: SortKey,
    order: SortOrder,
) -> Vec<TorrentCandidate> {
    let ascending = |a: &TorrentCandidate, b: &TorrentCandidate| -> Ordering {
        match key {
            SortKey::Seeders => a.seeders.cmp(&b.seeders),
            SortKey::Size => parse_size_bytes(&a.size).cmp(&parse_size_bytes(&b.size)),
            SortKey::Date => a.added_date.cmp(&b.added_date),
        }
    };

    match order {
        SortOrder::Asc => candidates.sort_by(ascending),
        SortOrder::Desc => candidates.sort_by(|a, b| ascending(b, a)),
    }
    candidates
}

/// Parse a size like `1.46 GB`, `700MiB`, `2,1 ГБ` or `1,234.5 MB` into bytes
/// (powers of 1024).
///
/// Returns `None` for text that is not a size. `None` orders below any value.
pub fn parse_size_bytes(size: &str) -> Option<u64> {
    let text = size.trim();
    let split = text
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == ','))
        .unwrap_or(text.len());
    let (number, unit) = text.split_at(split);

    let mantissa: f64 = normalize_number(number).parse().ok()?;
    let exponent = unit_exponent(unit.trim())?;

    Some((mantissa * 1024f64.powi(exponent)).round() as u64)
}

/// `1,234.5` and `1,234` use commas as thousands separators; `2,5` is a decimal comma.
fn normalize_number(number: &str) -> String {
    let integer = number.split('.').next().unwrap_or_default();
    let mut groups = integer.split(',');
    let lead = groups.next().unwrap_or_default();
    let rest: Vec<&str> = groups.collect();
    let grouped =
        !rest.is_empty() && (1..=3).contains(&lead.len()) && rest.iter().all(|g| g.len() == 3);

    if grouped {
        number.replace(',', "")
    } else {
        number.replace(',', ".")
    }
}

fn unit_exponent(unit: &str) -> Option<i32> {
    let upper = unit.to_uppercase().replace('I', "");
    let exponent = match upper.as_str() {
        "B" | "Б" => 0,
        "KB" | "КБ" => 1,
        "MB" | "МБ" => 2,
        "GB" | "ГБ" => 3,
        "TB" | "ТБ" => 4,
        "PB" => 5,
        "EB" => 6,
        _ => return None,
    };
    Some(exponent)
}
