/// Length of each element line in the NORAD TLE format
/// https://en.wikipedia.org/wiki/Two-line_element_set
pub const TLE_LINE_LEN: usize = 69;

/// Unstructured TLE: a satellite name followed by the two element lines,
/// as split out of a multi-satellite set before field extraction
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct UnstructuredTle {
    pub satellite_name: String,
    pub line1: String,
    pub line2: String,
}
