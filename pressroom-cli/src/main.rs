mod editor;
mod logging;
mod output;
mod settings;

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand, ValueEnum};
use pressroom_client::{
    BlogClient, Category, ClientError, CompareSelection, Confirm, CreateCommentRequest,
    DestructiveAction, Direction, FileStore, KeyValueStore, LoginRequest, Navigator, PageRequest,
    PostInput, Reaction, ReactionToggle, RegisterRequest, Route, SessionContext, SortBy,
    ThemeContext, UpdateProfileRequest, confirm_then, extract_headings,
};

use editor::{EditorOptions, run_editor};
use output::*;
use settings::Settings;

#[derive(Debug, Parser)]
#[command(name = "pressroom", version, about = "CLI клиент блога")]
struct Cli {
    /// Базовый URL REST API (по умолчанию PRESSROOM_API_URL).
    #[arg(long, global = true)]
    server: Option<String>,

    /// Не спрашивать подтверждение необратимых действий.
    #[arg(long, short = 'y', global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SortArg {
    Created,
    Updated,
    Views,
    Title,
}

impl From<SortArg> for SortBy {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Created => SortBy::CreatedAt,
            SortArg::Updated => SortBy::UpdatedAt,
            SortArg::Views => SortBy::Views,
            SortArg::Title => SortBy::Title,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::Args)]
struct PageArgs {
    #[arg(long, default_value_t = 0)]
    page: u32,
    #[arg(long, default_value_t = 10)]
    size: u32,
}

impl From<PageArgs> for PageRequest {
    fn from(value: PageArgs) -> Self {
        PageRequest::new(value.page, value.size)
    }
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Регистрация пользователя.
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        nickname: Option<String>,
    },
    /// Вход пользователя.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Выход: сессия удаляется локально.
    Logout,
    /// Текущий пользователь.
    Whoami,
    /// Посты.
    Posts {
        #[command(subcommand)]
        command: PostsCommand,
    },
    /// Черновики текущего пользователя.
    Drafts {
        #[command(subcommand)]
        command: DraftsCommand,
    },
    /// Редактирование markdown-файла с автосохранением черновика.
    Write {
        /// Файл с текстом поста.
        file: PathBuf,
        /// Заголовок; по умолчанию первый заголовок файла.
        #[arg(long)]
        title: Option<String>,
        /// Продолжить редактирование существующего поста.
        #[arg(long)]
        id: Option<i64>,
        /// Период опроса файла, мс.
        #[arg(long, default_value_t = 1000)]
        poll_ms: u64,
    },
    /// Комментарии.
    Comments {
        #[command(subcommand)]
        command: CommentsCommand,
    },
    /// Поставить или снять лайк.
    Like { post_id: i64 },
    /// Добавить в избранное или убрать оттуда.
    Favorite { post_id: i64 },
    /// Избранные посты.
    Favorites {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Теги.
    Tags {
        #[command(subcommand)]
        command: TagsCommand,
    },
    /// Категории.
    Categories {
        #[command(subcommand)]
        command: Option<CategoriesCommand>,
    },
    /// Архив по месяцам; с --year и --month выводит посты месяца.
    Archives {
        #[arg(long, requires = "month")]
        year: Option<i32>,
        #[arg(long, requires = "year")]
        month: Option<u32>,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Загрузка изображения.
    Upload { file: PathBuf },
    /// Профиль.
    Profile {
        #[command(subcommand)]
        command: ProfileCommand,
    },
    /// История версий поста.
    Versions {
        #[command(subcommand)]
        command: VersionsCommand,
    },
    /// Оглавление markdown-файла.
    Toc { file: PathBuf },
    /// Тема оформления.
    Theme {
        #[command(subcommand)]
        command: ThemeCommand,
    },
    /// RSS-лента.
    Rss {
        /// Лента одной категории.
        #[arg(long)]
        category: Option<i64>,
        /// Показать описание подписки вместо XML.
        #[arg(long)]
        info: bool,
    },
}

#[derive(Debug, Subcommand)]
enum PostsCommand {
    /// Лента опубликованных постов.
    List {
        #[command(flatten)]
        page: PageArgs,
        #[arg(long, value_enum, default_value_t = SortArg::Created)]
        sort: SortArg,
        /// По возрастанию.
        #[arg(long)]
        asc: bool,
    },
    /// Пост по id.
    Get { id: i64 },
    /// Поиск.
    Search {
        keyword: String,
        #[command(flatten)]
        page: PageArgs,
    },
    /// Популярные.
    Popular,
    /// Последние.
    Recent,
    /// Создание поста (требует вход).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,
        /// Markdown-файл с содержимым.
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,
        #[arg(long)]
        category: Option<i64>,
        /// Опубликовать сразу; иначе пост станет черновиком.
        #[arg(long)]
        publish: bool,
    },
    /// Обновление поста (требует вход).
    ///
    /// Неуказанные поля берутся из текущей версии поста.
    Update {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long, conflicts_with = "file")]
        content: Option<String>,
        #[arg(long)]
        file: Option<PathBuf>,
        #[arg(long)]
        summary: Option<String>,
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,
        #[arg(long)]
        category: Option<i64>,
        #[arg(long, conflicts_with = "unpublish")]
        publish: bool,
        #[arg(long)]
        unpublish: bool,
        /// Комментарий к изменению для истории версий.
        #[arg(long)]
        note: Option<String>,
    },
    /// Удаление поста (требует вход).
    Delete { id: i64 },
    /// Мои посты, включая черновики.
    Mine {
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Debug, Subcommand)]
enum DraftsCommand {
    /// Список черновиков.
    List {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Удаление черновика.
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
enum CommentsCommand {
    /// Комментарии к посту.
    List {
        post_id: i64,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long, default_value_t = PageRequest::comments().size)]
        size: u32,
    },
    /// Новый комментарий или ответ.
    Add {
        post_id: i64,
        content: String,
        #[arg(long)]
        reply_to: Option<i64>,
    },
    /// Удаление комментария.
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
enum TagsCommand {
    /// Все теги.
    List,
    /// Популярные теги.
    Popular,
    /// Поиск тегов.
    Search { keyword: String },
    /// Посты с тегом.
    Posts {
        tag_id: i64,
        #[command(flatten)]
        page: PageArgs,
    },
}

#[derive(Debug, Subcommand)]
enum CategoriesCommand {
    /// Все категории.
    List,
    /// Новая категория.
    Add {
        name: String,
        #[arg(long)]
        description: Option<String>,
    },
    /// Удаление категории.
    Delete { id: i64 },
}

#[derive(Debug, Subcommand)]
enum ProfileCommand {
    /// Свой профиль или профиль пользователя.
    Show { username: Option<String> },
    /// Изменение своего профиля.
    Update {
        #[arg(long)]
        nickname: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
    },
}

#[derive(Debug, Subcommand)]
enum VersionsCommand {
    /// Все версии поста.
    List { post_id: i64 },
    /// Конкретная версия.
    Show { post_id: i64, version: u32 },
    /// Сравнение: из перечисленных версий берутся две выбранные последними.
    Compare {
        post_id: i64,
        #[arg(num_args = 2.., required = true)]
        versions: Vec<u32>,
    },
}

#[derive(Debug, Subcommand)]
enum ThemeCommand {
    /// Текущая тема.
    Show,
    /// Переключить тему.
    Toggle,
}

/// Подтверждение в терминале; с `--yes` вопрос не задаётся.
struct TerminalConfirm {
    assume_yes: bool,
}

impl Confirm for TerminalConfirm {
    fn confirm(&self, action: DestructiveAction) -> bool {
        if self.assume_yes {
            return true;
        }
        eprint!("{} [y/N] ", action.prompt());
        if io::stderr().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => parse_answer(&answer),
            Err(_) => false,
        }
    }
}

fn parse_answer(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "д" | "да")
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let settings = Settings::from_env().context("некорректная конфигурация")?;
    logging::init_logging(&settings.log_level)?;

    let mut config = settings.client_config();
    if let Some(server) = cli.server {
        config.base_url = normalize_server(server);
    }

    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(settings.session_file.clone()));
    let start = initial_route(&cli.command);
    let navigator = Navigator::new(start.clone());
    let client = BlogClient::new(config, SessionContext::load(Arc::clone(&store)), navigator)
        .map_err(map_client_error)?;
    let confirm = TerminalConfirm {
        assume_yes: cli.yes,
    };

    let result = execute(&client, &store, &settings, &confirm, cli.command).await;
    if result.is_err() && session_expired(&start, &client.navigator().current()) {
        eprintln!("Сессия истекла, локальная сессия удалена");
    }
    result
}

/// Экран, с которого выполняется команда.
fn initial_route(command: &Command) -> Route {
    match command {
        Command::Login { .. } => Route::Login,
        Command::Register { .. } => Route::Register,
        _ => Route::Home,
    }
}

fn session_expired(start: &Route, current: &Route) -> bool {
    !start.is_unauthenticated() && *current == Route::Login
}

async fn execute(
    client: &BlogClient,
    store: &Arc<dyn KeyValueStore>,
    settings: &Settings,
    confirm: &TerminalConfirm,
    command: Command,
) -> Result<()> {
    match command {
        Command::Register {
            username,
            email,
            password,
            nickname,
        } => {
            let auth = client
                .auth()
                .register(&RegisterRequest {
                    username,
                    email,
                    password,
                    nickname,
                })
                .await
                .map_err(map_client_error)?;
            print_auth("Регистрация успешна", &auth);
        }
        Command::Login { username, password } => {
            let auth = client
                .auth()
                .login(&LoginRequest { username, password })
                .await
                .map_err(map_client_error)?;
            print_auth("Вход выполнен", &auth);
        }
        Command::Logout => {
            client.auth().logout();
            println!("Выход выполнен");
        }
        Command::Whoami => match client.auth().current_user() {
            Some(user) => println!("{} <{}> ({})", user.username, user.email, user.role),
            None => println!("Вход не выполнен"),
        },
        Command::Posts { command } => posts(client, confirm, command).await?,
        Command::Drafts { command } => match command {
            DraftsCommand::List { page } => {
                let page = client
                    .posts()
                    .drafts(page.into())
                    .await
                    .map_err(map_client_error)?;
                print_post_page(&page);
            }
            DraftsCommand::Delete { id } => {
                let deleted = confirm_then(
                    confirm,
                    DestructiveAction::DeleteDraft,
                    client.posts().delete(id),
                )
                .await
                .map_err(map_client_error)?;
                report_deleted(deleted, &format!("Черновик удалён: id={id}"));
            }
        },
        Command::Write {
            file,
            title,
            id,
            poll_ms,
        } => {
            require_login(client)?;
            let options = EditorOptions {
                file,
                title,
                post_id: id,
                poll_interval: Duration::from_millis(poll_ms.max(50)),
                autosave_delay: settings.autosave_delay,
            };
            run_editor(client.clone(), options).await?;
        }
        Command::Comments { command } => comments(client, confirm, command).await?,
        Command::Like { post_id } => {
            let toggle = ReactionToggle::load(client.clone(), Reaction::Like, post_id)
                .await
                .map_err(map_client_error)?;
            let state = toggle.toggle().await.map_err(map_client_error)?;
            let label = if state.active { "Лайк поставлен" } else { "Лайк снят" };
            println!("{label}: {} всего", state.count);
        }
        Command::Favorite { post_id } => {
            let toggle = ReactionToggle::load(client.clone(), Reaction::Favorite, post_id)
                .await
                .map_err(map_client_error)?;
            let state = if toggle.snapshot().active {
                let toggled =
                    confirm_then(confirm, DestructiveAction::Unfavorite, toggle.toggle())
                        .await
                        .map_err(map_client_error)?;
                match toggled {
                    Some(state) => state,
                    None => {
                        println!("Отменено");
                        return Ok(());
                    }
                }
            } else {
                toggle.toggle().await.map_err(map_client_error)?
            };
            let label = if state.active {
                "Добавлено в избранное"
            } else {
                "Убрано из избранного"
            };
            println!("{label}: {} всего", state.count);
        }
        Command::Favorites { page } => {
            let page = client
                .favorites()
                .mine(page.into())
                .await
                .map_err(map_client_error)?;
            print_post_page(&page);
        }
        Command::Tags { command } => match command {
            TagsCommand::List => print_tags(&client.tags().all().await.map_err(map_client_error)?),
            TagsCommand::Popular => {
                print_tags(&client.tags().popular().await.map_err(map_client_error)?)
            }
            TagsCommand::Search { keyword } => print_tags(
                &client
                    .tags()
                    .search(&keyword)
                    .await
                    .map_err(map_client_error)?,
            ),
            TagsCommand::Posts { tag_id, page } => {
                let page = client
                    .tags()
                    .posts(tag_id, page.into())
                    .await
                    .map_err(map_client_error)?;
                print_post_page(&page);
            }
        },
        Command::Categories { command } => {
            match command.unwrap_or(CategoriesCommand::List) {
                CategoriesCommand::List => print_categories(
                    &client.categories().all().await.map_err(map_client_error)?,
                ),
                CategoriesCommand::Add { name, description } => {
                    let category = client
                        .categories()
                        .create(&Category {
                            id: 0,
                            name,
                            description,
                        })
                        .await
                        .map_err(map_client_error)?;
                    println!("Категория создана: id={}", category.id);
                }
                CategoriesCommand::Delete { id } => {
                    let deleted = confirm_then(
                        confirm,
                        DestructiveAction::DeleteCategory,
                        client.categories().delete(id),
                    )
                    .await
                    .map_err(map_client_error)?;
                    report_deleted(deleted, &format!("Категория удалена: id={id}"));
                }
            }
        }
        Command::Archives { year, month, page } => match (year, month) {
            (Some(year), Some(month)) => {
                let page = client
                    .archives()
                    .posts(year, month, page.into())
                    .await
                    .map_err(map_client_error)?;
                print_post_page(&page);
            }
            _ => print_archives(&client.archives().list().await.map_err(map_client_error)?),
        },
        Command::Upload { file } => {
            let bytes = fs::read(&file)
                .with_context(|| format!("не удалось прочитать {}", file.display()))?;
            let filename = file
                .file_name()
                .and_then(|name| name.to_str())
                .ok_or_else(|| anyhow!("некорректное имя файла: {}", file.display()))?;
            let uploaded = client
                .files()
                .upload_image(filename, bytes)
                .await
                .map_err(map_client_error)?;
            println!("Файл загружен: {}", uploaded.url);
            println!("markdown: ![{filename}]({})", uploaded.url);
        }
        Command::Profile { command } => match command {
            ProfileCommand::Show { username } => {
                let profile = match username {
                    Some(username) => client.users().by_username(&username).await,
                    None => client.users().profile().await,
                }
                .map_err(map_client_error)?;
                print_profile(&profile);
            }
            ProfileCommand::Update {
                nickname,
                email,
                bio,
                avatar,
            } => {
                let profile = client
                    .users()
                    .update_profile(&UpdateProfileRequest {
                        nickname,
                        email,
                        bio,
                        avatar,
                    })
                    .await
                    .map_err(map_client_error)?;
                println!("Профиль обновлён");
                print_profile(&profile);
            }
        },
        Command::Versions { command } => versions(client, command).await?,
        Command::Toc { file } => {
            let markdown = fs::read_to_string(&file)
                .with_context(|| format!("не удалось прочитать {}", file.display()))?;
            print_toc(&extract_headings(&markdown));
        }
        Command::Theme { command } => {
            let theme = ThemeContext::load(Arc::clone(store));
            match command {
                ThemeCommand::Show => println!("{}", theme.theme()),
                ThemeCommand::Toggle => println!("Тема: {}", theme.toggle()),
            }
        }
        Command::Rss { category, info } => {
            if info {
                let info = client.rss().info().await.map_err(map_client_error)?;
                println!("{}: {}", info.title, info.description);
                println!("{}", info.feed_url);
            } else {
                let xml = match category {
                    Some(id) => client.rss().category_feed_xml(id).await,
                    None => client.rss().feed_xml().await,
                }
                .map_err(map_client_error)?;
                println!("{xml}");
            }
        }
    }

    Ok(())
}

async fn posts(client: &BlogClient, confirm: &TerminalConfirm, command: PostsCommand) -> Result<()> {
    match command {
        PostsCommand::List { page, sort, asc } => {
            let direction = if asc { Direction::Asc } else { Direction::Desc };
            let page = client
                .posts()
                .list(page.into(), sort.into(), direction)
                .await
                .map_err(map_client_error)?;
            print_post_page(&page);
        }
        PostsCommand::Get { id } => {
            let post = client.posts().get(id).await.map_err(map_client_error)?;
            print_post("Пост", &post);
        }
        PostsCommand::Search { keyword, page } => {
            let page = client
                .posts()
                .search(&keyword, page.into())
                .await
                .map_err(map_client_error)?;
            print_post_page(&page);
        }
        PostsCommand::Popular => print_posts(&client.posts().popular().await.map_err(map_client_error)?),
        PostsCommand::Recent => print_posts(&client.posts().recent().await.map_err(map_client_error)?),
        PostsCommand::Create {
            title,
            content,
            file,
            summary,
            tags,
            category,
            publish,
        } => {
            let content = resolve_content(content, file)?.unwrap_or_default();
            let input = PostInput {
                title,
                content,
                summary,
                category_id: category,
                published: publish,
                tags,
                ..PostInput::default()
            };
            let post = client.posts().create(&input).await.map_err(map_client_error)?;
            let label = if post.is_draft() { "Черновик создан" } else { "Пост опубликован" };
            print_post(label, &post);
        }
        PostsCommand::Update {
            id,
            title,
            content,
            file,
            summary,
            tags,
            category,
            publish,
            unpublish,
            note,
        } => {
            let current = client.posts().get(id).await.map_err(map_client_error)?;
            let published = if publish {
                true
            } else if unpublish {
                false
            } else {
                current.published
            };
            let input = PostInput {
                title: title.unwrap_or(current.title),
                content: resolve_content(content, file)?.unwrap_or(current.content),
                summary: summary.or(current.summary),
                cover_image: current.cover_image,
                category_id: category.or(current.category_id),
                published,
                tags: tags.unwrap_or(current.tags),
                change_note: note,
            };
            let post = client
                .posts()
                .update(id, &input)
                .await
                .map_err(map_client_error)?;
            print_post("Пост обновлён", &post);
        }
        PostsCommand::Delete { id } => {
            let deleted = confirm_then(
                confirm,
                DestructiveAction::DeletePost,
                client.posts().delete(id),
            )
            .await
            .map_err(map_client_error)?;
            report_deleted(deleted, &format!("Пост удалён: id={id}"));
        }
        PostsCommand::Mine { page } => {
            let page = client
                .posts()
                .mine(page.into())
                .await
                .map_err(map_client_error)?;
            print_post_page(&page);
        }
    }
    Ok(())
}

async fn comments(
    client: &BlogClient,
    confirm: &TerminalConfirm,
    command: CommentsCommand,
) -> Result<()> {
    match command {
        CommentsCommand::List {
            post_id,
            page,
            size,
        } => {
            let page = client
                .comments()
                .for_post(post_id, PageRequest::new(page, size))
                .await
                .map_err(map_client_error)?;
            print_comments(&page);
        }
        CommentsCommand::Add {
            post_id,
            content,
            reply_to,
        } => {
            require_login(client)?;
            let comment = client
                .comments()
                .create(&CreateCommentRequest {
                    post_id,
                    parent_id: reply_to,
                    content,
                })
                .await
                .map_err(map_client_error)?;
            println!("Комментарий добавлен: id={}", comment.id);
        }
        CommentsCommand::Delete { id } => {
            let deleted = confirm_then(
                confirm,
                DestructiveAction::DeleteComment,
                client.comments().delete(id),
            )
            .await
            .map_err(map_client_error)?;
            report_deleted(deleted, &format!("Комментарий удалён: id={id}"));
        }
    }
    Ok(())
}

async fn versions(client: &BlogClient, command: VersionsCommand) -> Result<()> {
    match command {
        VersionsCommand::List { post_id } => {
            let versions = client
                .versions()
                .history(post_id)
                .await
                .map_err(map_client_error)?;
            print_versions(&versions);
        }
        VersionsCommand::Show { post_id, version } => {
            let version = client
                .versions()
                .get(post_id, version)
                .await
                .map_err(map_client_error)?;
            print_version(&version);
        }
        VersionsCommand::Compare { post_id, versions } => {
            let selection = select_versions(&versions);
            let (v1, v2) = selection
                .pair()
                .ok_or_else(|| anyhow!("нужно выбрать две разные версии"))?;
            if let Some(route) = selection.compare_route(post_id) {
                client.navigator().navigate(route);
            }
            let comparison = client
                .versions()
                .compare(post_id, v1, v2)
                .await
                .map_err(map_client_error)?;
            print_comparison(&comparison);
        }
    }
    Ok(())
}

fn select_versions(versions: &[u32]) -> CompareSelection {
    let mut selection = CompareSelection::new();
    for version in versions {
        selection.toggle(*version);
    }
    selection
}

fn resolve_content(content: Option<String>, file: Option<PathBuf>) -> Result<Option<String>> {
    match (content, file) {
        (Some(content), _) => Ok(Some(content)),
        (None, Some(file)) => fs::read_to_string(&file)
            .map(Some)
            .with_context(|| format!("не удалось прочитать {}", file.display())),
        (None, None) => Ok(None),
    }
}

fn require_login(client: &BlogClient) -> Result<()> {
    if client.session().is_authenticated() {
        return Ok(());
    }
    Err(map_client_error(ClientError::LoginRequired))
}

fn report_deleted(deleted: Option<()>, message: &str) {
    match deleted {
        Some(()) => println!("{message}"),
        None => println!("Отменено"),
    }
}

fn normalize_server(server: String) -> String {
    if server.starts_with("http://") || server.starts_with("https://") {
        return server;
    }

    format!("http://{server}")
}

fn map_client_error(err: ClientError) -> anyhow::Error {
    let message = match err {
        ClientError::Unauthorized(message) => format!(
            "требуется авторизация ({message}): выполните `pressroom login ...` или `pressroom register ...`"
        ),
        ClientError::LoginRequired => {
            "сначала войдите: `pressroom login --username ... --password ...`".to_string()
        }
        ClientError::Forbidden(message) => format!("нет доступа: {message}"),
        ClientError::NotFound(message) => format!("ресурс не найден: {message}"),
        ClientError::Validation { message, fields } if !fields.is_empty() => {
            let details = fields
                .iter()
                .map(|(field, error)| format!("{field}: {error}"))
                .collect::<Vec<_>>()
                .join("; ");
            format!("{message} ({details})")
        }
        ClientError::Validation { message, .. } => format!("некорректные данные: {message}"),
        ClientError::Server { status, message } => format!("ошибка сервера {status}: {message}"),
        ClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        ClientError::Network(err) => format!("ошибка HTTP: {err}"),
        ClientError::Decode(message) => format!("не удалось разобрать ответ: {message}"),
        ClientError::Storage(message) => format!("ошибка хранилища сессии: {message}"),
    };
    anyhow!(message)
}
