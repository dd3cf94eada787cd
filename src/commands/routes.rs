//! Print the route table

use anyhow::Result;

use crate::helpers::full_url_for;
use crate::routes::RouteTable;
use crate::Site;

pub fn run(site: &Site, json: bool) -> Result<()> {
    let posts = site.loader().load_posts()?;
    let table = RouteTable::build(&posts);

    if json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    print!("{}", render_text(&site.config.title, &site.config.url, &table));
    Ok(())
}

/// One line per route with its post count and absolute URL
pub fn render_text(title: &str, base_url: &str, table: &RouteTable) -> String {
    let mut out = format!("{} routes ({}):\n", title, table.len());
    for route in table.iter() {
        out.push_str(&format!(
            "  {} ({}) {}\n",
            route.path,
            route.post_count_label(),
            full_url_for(base_url, &route.path)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Post;
    use crate::helpers::parse_date_string;

    #[test]
    fn test_render_text() {
        let post = Post::new(
            "hello-world".to_string(),
            "Hello".to_string(),
            parse_date_string("2024-03-01T10:00:00.000Z").unwrap(),
        );
        let table = RouteTable::build(&[post]);
        let text = render_text("My Blog", "https://example.com", &table);

        assert!(text.starts_with(&format!("My Blog routes ({}):\n", table.len())));
        assert!(text.contains("  /posts/hello-world (1 post) https://example.com/posts/hello-world\n"));
        assert!(text.contains("  /day/2024-03-01 (1 post) "));
    }
}
