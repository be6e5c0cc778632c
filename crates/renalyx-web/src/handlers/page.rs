//! Shared HTML page shell.

pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn page(title: &str, body: &str) -> String {
    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>CKD Prediction | {}</title>
    <style>
        body {{ font-family: Helvetica, Arial, sans-serif; max-width: 720px; margin: 2rem auto; }}
        table {{ border-collapse: collapse; width: 100%; }}
        th {{ background: grey; color: whitesmoke; }}
        td {{ background: beige; }}
        th, td {{ border: 1px solid black; padding: 6px; text-align: center; }}
        .error {{ color: #b00020; font-weight: bold; }}
    </style>
</head>
<body>
<h1>{}</h1>
{}
</body>
</html>"#, escape(title), escape(title), body)
}
