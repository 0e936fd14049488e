use pressroom_client::{
    Archive, AuthResponse, Category, Comment, Heading, Page, Post, PostVersion, Tag, UserProfile,
    VersionComparison, format_timestamp,
};

pub fn print_auth(title: &str, auth: &AuthResponse) {
    println!("{title}");
    println!("user:");
    println!("  id: {}", auth.user.id);
    println!("  username: {}", auth.user.username);
    println!("  email: {}", auth.user.email);
    println!("  role: {}", auth.user.role);
}

pub fn print_post(title: &str, post: &Post) {
    println!("{title}");
    println!("id: {}", post.id);
    println!("title: {}", post.title);
    println!("status: {}", if post.is_draft() { "draft" } else { "published" });
    if let Some(summary) = &post.summary {
        println!("summary: {summary}");
    }
    if let Some(category) = &post.category_name {
        println!("category: {category}");
    }
    if !post.tags.is_empty() {
        println!("tags: {}", post.tags.join(", "));
    }
    println!("author: {}", post.author_name.as_deref().unwrap_or("-"));
    println!(
        "views: {}, likes: {}, comments: {}",
        post.views, post.like_count, post.comment_count
    );
    println!("created_at: {}", format_timestamp(&post.created_at));
    println!("updated_at: {}", format_timestamp(&post.updated_at));
    println!();
    println!("{}", post.content);
}

pub fn print_post_line(post: &Post) {
    let marker = if post.is_draft() { " [draft]" } else { "" };
    println!(
        "- [{}] {}{marker} ({}, {})",
        post.id,
        post.title,
        post.author_name.as_deref().unwrap_or("-"),
        format_timestamp(&post.updated_at)
    );
}

pub fn print_posts(posts: &[Post]) {
    if posts.is_empty() {
        println!("Постов нет");
    }
    for post in posts {
        print_post_line(post);
    }
}

pub fn print_post_page(page: &Page<Post>) {
    println!(
        "Постов: {} (page={}, size={}, total={}, pages={})",
        page.items.len(),
        page.page,
        page.size,
        page.total_elements,
        page.total_pages
    );
    for post in &page.items {
        print_post_line(post);
    }
    if page.has_next() {
        println!("... следующая страница: --page {}", page.page + 1);
    }
}

pub fn print_comments(page: &Page<Comment>) {
    println!("Комментариев: {}", page.total_elements);
    for comment in &page.items {
        print_comment(comment, 0);
    }
}

fn print_comment(comment: &Comment, depth: usize) {
    let indent = "  ".repeat(depth);
    println!(
        "{indent}- [{}] {} ({}): {}",
        comment.id,
        comment.username,
        format_timestamp(&comment.created_at),
        comment.content
    );
    for reply in &comment.replies {
        print_comment(reply, depth + 1);
    }
}

pub fn print_tags(tags: &[Tag]) {
    for tag in tags {
        println!("- [{}] {} ({})", tag.id, tag.name, tag.use_count);
    }
}

pub fn print_categories(categories: &[Category]) {
    for category in categories {
        match &category.description {
            Some(description) => println!("- [{}] {}: {description}", category.id, category.name),
            None => println!("- [{}] {}", category.id, category.name),
        }
    }
}

pub fn print_archives(archives: &[Archive]) {
    for archive in archives {
        println!("- {} ({})", archive.label(), archive.count);
    }
}

pub fn print_profile(profile: &UserProfile) {
    println!("id: {}", profile.id);
    println!("username: {}", profile.username);
    if let Some(nickname) = &profile.nickname {
        println!("nickname: {nickname}");
    }
    if let Some(email) = &profile.email {
        println!("email: {email}");
    }
    if let Some(bio) = &profile.bio {
        println!("bio: {bio}");
    }
    println!("registered: {}", format_timestamp(&profile.created_at));
    println!(
        "posts: {} (published {}), views: {}, favorites: {}",
        profile.post_count, profile.published_post_count, profile.total_views, profile.favorite_count
    );
}

pub fn print_versions(versions: &[PostVersion]) {
    for version in versions {
        println!(
            "- v{} {} by {} ({}){}",
            version.version,
            version.title,
            version.created_by_username.as_deref().unwrap_or("-"),
            format_timestamp(&version.created_at),
            version
                .change_note
                .as_deref()
                .map(|note| format!(": {note}"))
                .unwrap_or_default()
        );
    }
}

pub fn print_version(version: &PostVersion) {
    println!("version: {}", version.version);
    println!("title: {}", version.title);
    println!("created_at: {}", format_timestamp(&version.created_at));
    println!();
    println!("{}", version.content);
}

pub fn print_comparison(comparison: &VersionComparison) {
    println!(
        "v{} -> v{}",
        comparison.version1.version, comparison.version2.version
    );
    if !comparison.has_changes() {
        println!("Отличий нет");
        return;
    }
    let changed = [
        ("title", comparison.title_changed),
        ("content", comparison.content_changed),
        ("summary", comparison.summary_changed),
        ("tags", comparison.tags_changed),
    ];
    for (field, _) in changed.iter().filter(|(_, changed)| *changed) {
        println!("changed: {field}");
    }
    if comparison.title_changed {
        println!("  - {}", comparison.version1.title);
        println!("  + {}", comparison.version2.title);
    }
}

pub fn print_toc(headings: &[Heading]) {
    for heading in headings {
        let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
        println!("{indent}- {} (#{})", heading.text, heading.id);
    }
}
