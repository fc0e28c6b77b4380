//! Lightweight XML emission for the SVG scene. `write_xml!` checks the
//! element/attribute structure at compile time and expands to a single
//! `write_fmt` call, so no DOM is built.

#[macro_export]
macro_rules! xml_format_args {
    // ends a tag
    (@inner(> $($rest:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@outer($($rest)*) -> ($($pattern),*, ">"), ($($args),*))
    };
    // ends a self-closing element
    (@inner(/> $($rest:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@outer($($rest)*) -> ($($pattern),*, " />"), ($($args),*))
    };
    // an attribute with a hyphenated name, e.g. stroke-width
    (@inner($name1:ident-$name2:ident $($rest:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@attr($($rest)*) -> ($($pattern),*, " ", stringify!($name1), "-", stringify!($name2)), ($($args),*))
    };
    // an attribute whose name is a plain identifier
    (@inner($name:ident $($rest:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@attr($($rest)*) -> ($($pattern),*, " ", stringify!($name)), ($($args),*))
    };

    // an expression as an attribute value
    (@attr(={$value:expr} $($rest:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@inner($($rest)*) -> ($($pattern),*, "=\"{}\""), ($($args,)* $value))
    };
    // a literal as an attribute value
    (@attr(=$value:literal $($rest:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@inner($($rest)*) -> ($($pattern),*, "=\"", $value, "\""), ($($args),*))
    };

    // starts a tag
    (@outer(<$name:ident $($rest:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@inner($($rest)*) -> ($($pattern),*, "<", stringify!($name)), ($($args),*))
    };
    // an end tag
    (@outer(</$name:ident> $($rest:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@outer($($rest)*) -> ($($pattern),*, "</", stringify!($name), ">"), ($($args),*))
    };
    // a text expression
    (@outer({$text:expr} $($rest:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@outer($($rest)*) -> ($($pattern),*, "{}"), ($($args,)* $text))
    };
    // a text literal
    (@outer($text:literal $($rest:tt)*) -> ($($pattern:expr),*), ($($args:expr),*)) => {
        $crate::xml_format_args!(@outer($($rest)*) -> ($($pattern),*, $text), ($($args),*))
    };
    // the end of the xml
    (@outer() -> ($($pattern:expr),*), ($($args:expr),*)) => {
        format_args!(concat!($($pattern),*, "\n"), $($args),*)
    };

    // entry point: the start of the first tag
    (<$($rest:tt)*) => {
        $crate::xml_format_args!(@outer(<$($rest)*) -> (""), ())
    };
}

/// Write XML to an `io::Write` or `fmt::Write`
#[macro_export]
macro_rules! write_xml {
    ($dst:expr, $($xml:tt)*) => {
        $dst.write_fmt($crate::xml_format_args!($($xml)*))
    }
}

/// Format an XML element and its attributes as a `String`
#[macro_export]
macro_rules! format_xml {
    ($($xml:tt)*) => {{
        let mut s = String::new();
        std::fmt::Write::write_fmt(&mut s, $crate::xml_format_args!($($xml)*)).unwrap();
        s
    }}
}

#[cfg(test)]
mod tests {
    #[test]
    fn self_closing() {
        assert_eq!(format_xml!(<marker />), "<marker />\n");
    }

    #[test]
    fn expression_attribute() {
        assert_eq!(format_xml!(<circle r={2.0 + 1.0} />), "<circle r=\"3\" />\n");
    }

    #[test]
    fn literal_attribute() {
        assert_eq!(format_xml!(<path fill="none" />), "<path fill=\"none\" />\n");
    }

    #[test]
    fn hyphenated_attribute() {
        assert_eq!(
            format_xml!(<text text-anchor={"end"} />),
            "<text text-anchor=\"end\" />\n"
        );
    }

    #[test]
    fn mixed_attributes() {
        assert_eq!(
            format_xml!(<circle cx={1.5} cy={2.5} stroke="black" stroke-width={4} />),
            "<circle cx=\"1.5\" cy=\"2.5\" stroke=\"black\" stroke-width=\"4\" />\n"
        );
    }

    #[test]
    fn text_content() {
        assert_eq!(format_xml!(<title>{"ring"}</title>), "<title>ring</title>\n");
    }

    #[test]
    fn nested_elements() {
        assert_eq!(
            format_xml!(<text><textPath href="#arc">{"around"}</textPath></text>),
            "<text><textPath href=\"#arc\">around</textPath></text>\n"
        );
    }
}
