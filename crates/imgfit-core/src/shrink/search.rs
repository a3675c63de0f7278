//! Binary search over an integer encoder parameter.
//!
//! The size-targeting loop needs "the largest quality whose output fits the
//! budget". That question is answered here for any integer parameter and any
//! probe function, so the search logic stays independent of the encoders.

/// One probe outcome kept by the search: the parameter value tried and the
/// bytes it produced.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Parameter value that produced `bytes`.
    pub value: u8,
    /// Encoded output at that parameter value.
    pub bytes: Vec<u8>,
}

/// Result of a [`largest_feasible`] run.
#[derive(Debug)]
pub struct SearchOutcome {
    /// Largest parameter value whose output fit the budget, if any.
    pub best: Option<Candidate>,
    /// Smallest output produced across all probes (by byte length, with the
    /// lower parameter value winning ties). Present whenever at least one
    /// probe ran.
    pub smallest: Option<Candidate>,
    /// Number of probe calls made.
    pub probes: u32,
}

/// Find the largest parameter value in `[lo, hi]` whose probe output is at
/// most `budget` bytes.
///
/// Assumes output size is non-strictly increasing in the parameter; with a
/// non-monotonic probe the result may not be the globally largest feasible
/// value, but `smallest` still tracks the smallest output actually observed.
/// Runs at most ⌈log2(hi − lo + 1)⌉ + 1 probes. When no value is feasible,
/// `lo` itself is always among the probed values, so `smallest` holds the
/// floor-parameter output.
///
/// # Errors
///
/// Propagates the first probe error unchanged.
pub fn largest_feasible<E, F>(
    lo: u8,
    hi: u8,
    budget: usize,
    mut probe: F,
) -> Result<SearchOutcome, E>
where
    F: FnMut(u8) -> Result<Vec<u8>, E>,
{
    let mut lo = i32::from(lo);
    let mut hi = i32::from(hi);

    let mut best: Option<Candidate> = None;
    let mut smallest: Option<Candidate> = None;
    let mut probes = 0u32;

    while lo <= hi {
        let mid = ((lo + hi) / 2) as u8;
        let bytes = probe(mid)?;
        probes += 1;

        let replace = match &smallest {
            None => true,
            Some(s) => {
                bytes.len() < s.bytes.len() || (bytes.len() == s.bytes.len() && mid < s.value)
            }
        };
        if replace {
            smallest = Some(Candidate {
                value: mid,
                bytes: bytes.clone(),
            });
        }

        if bytes.len() <= budget {
            // Feasible: remember it and look for a higher quality that fits
            best = Some(Candidate { value: mid, bytes });
            lo = i32::from(mid) + 1;
        } else {
            hi = i32::from(mid) - 1;
        }
    }

    Ok(SearchOutcome {
        best,
        smallest,
        probes,
    })
}
