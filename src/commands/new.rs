//! Create a new draft post

use anyhow::{bail, Result};
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::content::slug::validate_slug;
use crate::content::FrontMatter;
use crate::Blog;

/// Scaffold an unpublished post, returning the path of the new file
pub fn create_post(
    blog: &Blog,
    title: &str,
    slug: Option<&str>,
    date: NaiveDate,
) -> Result<PathBuf> {
    let slug = match slug {
        Some(s) => s.to_string(),
        None => slug::slugify(title),
    };
    validate_slug(&slug)?;

    let store = blog.store();
    let file_path = store.post_path(&slug);
    if file_path.exists() {
        bail!("File already exists: {:?}", file_path);
    }

    let front_matter = FrontMatter {
        title: Some(title.to_string()),
        date: Some(date.format("%Y-%m-%d").to_string()),
        published: false,
        ..Default::default()
    };
    let source = front_matter.to_source("")?;

    fs::create_dir_all(store.content_dir())?;
    fs::write(&file_path, source)?;

    Ok(file_path)
}

/// Run the new command
pub fn run(blog: &Blog, title: &str, slug: Option<&str>) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let path = create_post(blog, title, slug, today)?;
    println!("Created: {:?}", path);
    Ok(())
}
