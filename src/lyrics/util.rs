use std::borrow::Cow;

/// Decode the named and numeric XML/HTML entities that show up in scraped
/// lyric pages: &amp; &lt; &gt; &quot; &apos;, plus &#nnn; and &#xhh;.
pub fn decode_xml_entities(input: &str) -> Cow<'_, str> {
    if !input.as_bytes().contains(&b'&') {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        rest = &rest[amp..];

        let Some(semi) = rest.find(';') else {
            out.push('&');
            rest = &rest[1..];
            continue;
        };

        let entity = &rest[1..semi];
        let named = match entity {
            "amp" => Some("&"),
            "lt" => Some("<"),
            "gt" => Some(">"),
            "quot" => Some("\""),
            "apos" => Some("'"),
            _ => None,
        };
        let numeric = if named.is_some() {
            None
        } else if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
            u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
        } else if let Some(dec) = entity.strip_prefix('#') {
            dec.parse::<u32>().ok().and_then(char::from_u32)
        } else {
            None
        };

        match (named, numeric) {
            (Some(s), _) => out.push_str(s),
            (None, Some(ch)) => out.push(ch),
            (None, None) => out.push_str(&rest[..=semi]),
        }
        rest = &rest[semi + 1..];
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Minimal HTML-to-text for scraped lyric blocks: drop tags, keep line breaks
/// for `<br>` and paragraph boundaries, then decode entities.
pub fn html_to_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    let mut tag_buf = String::new();

    for ch in html.chars() {
        if in_tag {
            if ch == '>' {
                in_tag = false;
                let t = tag_buf.trim().to_ascii_lowercase();
                if t.starts_with("br") || t.starts_with("/p") || t.starts_with('p') {
                    out.push('\n');
                }
                tag_buf.clear();
            } else {
                tag_buf.push(ch);
            }
            continue;
        }
        if ch == '<' {
            in_tag = true;
            tag_buf.clear();
            continue;
        }
        out.push(ch);
    }

    decode_xml_entities(&out).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entities_decode_named_and_numeric() {
        assert_eq!(decode_xml_entities("a&amp;b &lt;c&gt;"), "a&b <c>");
        assert_eq!(decode_xml_entities("&#9834; &#x266A;"), "♪ ♪");
        assert_eq!(decode_xml_entities("&bogus; & x"), "&bogus; & x");
    }

    #[test]
    fn html_breaks_become_newlines() {
        let html = "<span>[00:01.00]la</span><br/>[00:02.00]la&amp;la";
        assert_eq!(html_to_text(html), "[00:01.00]la\n[00:02.00]la&la");
    }
}
