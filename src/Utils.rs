/// terminal logger set up from the binary and the examples
pub mod logger;
/// parsing of "A:0.7, B:0.3" composition strings
///
///  # Examples
/// ```
/// use SurfKin::Utils::composition::parse_composition;
/// let x = parse_composition("H2:0.5, AR:0.5").unwrap();
/// assert_eq!(x["H2"], 0.5);
/// ```
pub mod composition;
