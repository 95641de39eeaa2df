//! Parses small embedded fixture strings for every supported pattern file
//! format, exercising each parser's public API the way a caller loading a
//! real file from disk would.

use antenna_formats::ParserOptions;
use antenna_formats::parsers::{bilinear, cruise, eznec, monopulse, nsma, pat, rel, xfdtd};

const PAT_FIXTURE: &str = "\
ANGLE 2
AZIMUTH 5
-4 -10.0
-2 -3.0
0 0.0
2 -3.0
4 -10.0
ELEVATION 3
-5 -6.0
0 0.0
5 -6.0
";

const REL_FIXTURE: &str = "\
3 3
-10 -3.0
0 0.0
10 -3.0
-10 -6.0
0 0.0
10 -6.0
";

const CRUISE_FIXTURE: &str = "\
AZIMUTH
3 2
-10 10
8.0 10.0
1.0 1.0 1.0
0.9 1.0 0.9
ELEVATION
3 2
-5 5
8.0 10.0
1.0 1.0 1.0
1.0 1.0 1.0
";

const MONOPULSE_FIXTURE: &str = "\
SUM
2 2 2
-2 4
-2 4
9.0 11.0
0.0 0.0 -3.0 0.0
-3.0 0.0 -6.0 0.0
0.0 0.0 -3.0 0.0
-3.0 0.0 -6.0 0.0
DIFF
2 2 2
-2 4
-2 4
9.0 11.0
-20.0 90.0 -15.0 90.0
-15.0 90.0 -10.0 90.0
-20.0 90.0 -15.0 90.0
-15.0 90.0 -10.0 90.0
";

const BILINEAR_FIXTURE: &str = "\
2 2 2
-2 4
-2 4
9.0 11.0
0.0 -3.0
-3.0 -6.0
0.0 -3.0
-3.0 -6.0
";

const NSMA_FIXTURE: &str = "\
Acme Antennas
Model 900X
dual-polarized panel
FCC-12345
Rev B
2024-01-01
ANT-1
5925 6425
38.0
1.8
CHANNEL HH AZ 3
-2 -3.0
0 0.0
2 -3.0
CHANNEL HH EL 3
-1 -3.0
0 0.0
1 -3.0
";

const EZNEC_FIXTURE: &str = "\
CONVENTION MATH
2
ELEVATION -5 3
-10 -6.0 -3.0 -2.0
0 -3.0 0.0 1.0
10 -6.0 -3.0 -2.0
ELEVATION 5 3
-10 -9.0 -6.0 -5.0
0 -6.0 -3.0 -2.0
10 -9.0 -6.0 -5.0
";

const XFDTD_FIXTURE: &str = "\
FREQUENCY: 2400
THETA_COUNT: 3
PHI_COUNT: 3
THETA_STEP_DEG: 45
PHI_STEP_DEG: 90
DATA
0.0 -1.0 0.0 0.0
-3.0 -4.0 90.0 90.0
0.0 -1.0 0.0 0.0
-3.0 -4.0 90.0 90.0
0.0 -1.0 0.0 0.0
-3.0 -4.0 90.0 90.0
0.0 -1.0 0.0 0.0
-3.0 -4.0 90.0 90.0
0.0 -1.0 0.0 0.0
";

#[test]
fn pat_fixture_parses() {
    let opts = ParserOptions::default();
    let table = pat::parse(PAT_FIXTURE, &opts).expect("PAT fixture should parse");
    assert_eq!(table.azim.inner().len(), 5);
}

#[test]
fn rel_fixture_parses() {
    let table = rel::parse(REL_FIXTURE).expect("REL fixture should parse");
    assert_eq!(table.elev.len(), 3);
}

#[test]
fn cruise_fixture_parses() {
    let table = cruise::parse(CRUISE_FIXTURE).expect("CRUISE fixture should parse");
    assert_eq!(table.azim.freq_bounds(), (8.0e9, 10.0e9));
}

#[test]
fn monopulse_fixture_parses() {
    let table = monopulse::parse(MONOPULSE_FIXTURE).expect("Monopulse fixture should parse");
    assert_eq!(table.sum.grids.len(), 2);
    assert_eq!(table.diff.grids.len(), 2);
}

#[test]
fn bilinear_fixture_parses() {
    let table = bilinear::parse(BILINEAR_FIXTURE).expect("BiLinear fixture should parse");
    assert_eq!(table.grids.len(), 2);
}

#[test]
fn nsma_fixture_parses() {
    let table = nsma::parse(NSMA_FIXTURE).expect("NSMA fixture should parse");
    assert!(table.channel(nsma::PolChannel::Hh, nsma::PlaneAxis::Az).is_some());
}

#[test]
fn eznec_fixture_parses() {
    let table = eznec::parse(EZNEC_FIXTURE).expect("EZNEC fixture should parse");
    assert_eq!(table.convention, eznec::AngleConvention::Math);
}

#[test]
fn xfdtd_fixture_parses() {
    let table = xfdtd::parse(XFDTD_FIXTURE).expect("XFDTD fixture should parse");
    assert_eq!(table.header.theta_count, 3);
}
