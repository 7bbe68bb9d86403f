use anyhow::{anyhow, Result};

/// Parse a seed given as decimal or `0x`-prefixed hex.
pub fn parse_seed(raw: &str) -> Result<u32> {
    let trimmed = raw.trim();
    let parsed = if let Some(hex) = trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X"))
    {
        u32::from_str_radix(&hex.replace('_', ""), 16)
    } else {
        trimmed.replace('_', "").parse::<u32>()
    };
    parsed.map_err(|_| anyhow!("invalid seed '{raw}'"))
}

pub fn parse_seed_csv(raw: &str) -> Result<Vec<u32>> {
    let mut out = Vec::new();
    for part in raw.split(',') {
        if part.trim().is_empty() {
            continue;
        }
        out.push(parse_seed(part)?);
    }
    if out.is_empty() {
        return Err(anyhow!("no seeds in '{raw}'"));
    }
    Ok(out)
}

pub fn seed_to_hex(seed: u32) -> String {
    format!("{seed:#010x}")
}

/// Deterministic seed sequence from a starting point (LCG step), matching
/// what the benchmark uses when no explicit list is given.
pub fn seed_sequence(start: u32, count: u32) -> Vec<u32> {
    let mut out = Vec::with_capacity(count as usize);
    let mut cur = start;
    for _ in 0..count {
        out.push(cur);
        cur = cur.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
    }
    out
}
