//! Free-text sanitizer applied to every user-supplied string before it
//! reaches storage or a query parameter.
//!
//! `clean` drops HTML tag constructs (including the inner text of `script`
//! and `style` elements) and escapes any stray angle bracket that does not
//! form a tag. The output never contains a literal `<` or `>`, which makes
//! the function idempotent.

/// Strip markup from free text. `clean(clean(x)) == clean(x)` for all inputs.
pub fn clean(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    loop {
        let Some(i) = rest.find(['<', '>']) else {
            out.push_str(rest);
            break;
        };
        out.push_str(&rest[..i]);
        let bracket = rest.as_bytes()[i];
        rest = &rest[i + 1..];

        if bracket == b'>' {
            out.push_str("&gt;");
            continue;
        }

        let lower = rest.to_ascii_lowercase();
        if lower.starts_with("script") {
            rest = match skip_element(rest, &lower, "</script") {
                Some(r) => r,
                None => break,
            };
        } else if lower.starts_with("style") {
            rest = match skip_element(rest, &lower, "</style") {
                Some(r) => r,
                None => break,
            };
        } else if let Some(j) = rest.find('>') {
            // an ordinary tag — drop it, keep the surrounding text
            rest = &rest[j + 1..];
        } else {
            // a lone '<' with no closing bracket anywhere after it
            out.push_str("&lt;");
        }
    }

    out
}

/// Skip past `</script...>` / `</style...>`, discarding the element body.
/// Returns `None` when the element never closes (the remainder is dropped).
fn skip_element<'a>(rest: &'a str, lower: &str, closing: &str) -> Option<&'a str> {
    let j = lower.find(closing)?;
    let after = &rest[j..];
    let k = after.find('>')?;
    Some(&after[k + 1..])
}
