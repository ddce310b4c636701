use crate::utils::parse_port_number;

/// Delimiter between address segments: `...#<switchName>#<portNumber>`
pub const FRAGMENT_DELIMITER: char = '#';

/// NavigationContext identifies the switch port a details page was opened for.
/// It lives only for one page load and is never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationContext {
    /// Switch identifier exactly as it appeared in the address
    pub switch_name: String,
    /// Port number in its string form, digits only
    pub port_number: String,
}

impl NavigationContext {
    pub fn new(switch_name: impl Into<String>, port_number: impl Into<String>) -> Self {
        Self {
            switch_name: switch_name.into(),
            port_number: port_number.into(),
        }
    }
}

/// Raw address segments, before any validation. Empty segments count as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FragmentSegments<'a> {
    pub switch_name: Option<&'a str>,
    pub port_number: Option<&'a str>,
}

impl FragmentSegments<'_> {
    /// Validated context, if both segments are usable for a cache lookup
    pub fn context(&self) -> Option<NavigationContext> {
        let switch_name = self.switch_name?;
        let port_number = self.port_number?;
        parse_port_number(port_number)?;

        Some(NavigationContext::new(switch_name, port_number))
    }
}

/// Split a page address into its switch and port segments.
///
/// Segment 1 after splitting on `#` is the switch, segment 2 the port.
/// Segments are taken literally; no unescaping is done.
pub fn split_fragment(url: &str) -> FragmentSegments<'_> {
    let mut segments = url
        .split(FRAGMENT_DELIMITER)
        .skip(1)
        .map(|s| Some(s).filter(|s| !s.is_empty()));

    FragmentSegments {
        switch_name: segments.next().flatten(),
        port_number: segments.next().flatten(),
    }
}

/// Extract the switch and port identifiers from a page address.
///
/// Returns `None` when either segment is missing or empty, or when the
/// port segment is not an unsigned integer.
pub fn parse_navigation_context(url: &str) -> Option<NavigationContext> {
    split_fragment(url).context()
}
