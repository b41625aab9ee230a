use fancy_core::testing::ScriptedTransport;
use fancy_core::{HttpResponse, RequestClient, TableView};
use fancy_shell::cli::Cli;
use fancy_shell::grid::DataGrid;
use fancy_shell::{run, show};

async fn show_to_string(view: &mut TableView<ScriptedTransport>, grid: &DataGrid) -> String {
    let mut out = Vec::new();
    show(view, grid, &mut out).await.unwrap();
    String::from_utf8(out).unwrap()
}

fn scripted_view(response: HttpResponse) -> TableView<ScriptedTransport> {
    let client = RequestClient::new(ScriptedTransport::with_responses([response]));
    TableView::new(client, Some("http://localhost:5000/media/type/Serie".to_string()))
}

#[tokio::test]
async fn shows_header_table_and_count() {
    let mut view = scripted_view(HttpResponse::new(
        200,
        r#"[{"name":"Fargo","genre":"Crime","rating":8.9},{"name":"Dark","genre":"Mystery","rating":8.7}]"#,
    ));
    let text = show_to_string(&mut view, &DataGrid::default()).await;
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "FancyFilms");
    assert_eq!(lines[1], "==========");
    assert_eq!(lines[2], "");
    assert!(lines[3].starts_with("Name"));
    assert!(lines[5].starts_with("Fargo"));
    assert!(lines[6].starts_with("Dark"));
    assert_eq!(lines.last(), Some(&"2 entries"));
}

#[tokio::test]
async fn sorted_display_does_not_reorder_the_view() {
    let mut view = scripted_view(HttpResponse::new(
        200,
        r#"[{"name":"Fargo","genre":"Crime","rating":8.9},{"name":"Dark","genre":"Mystery","rating":8.7}]"#,
    ));
    let grid = DataGrid::new(vec!["name".parse().unwrap()]);
    let text = show_to_string(&mut view, &grid).await;

    let lines: Vec<&str> = text.lines().collect();
    assert!(lines[5].starts_with("Dark"));
    assert!(lines[6].starts_with("Fargo"));
    assert_eq!(view.items()[0].name, "Fargo");
}

#[tokio::test]
async fn failed_load_prints_notice_instead_of_count() {
    let mut view = scripted_view(HttpResponse::new(500, "boom"));
    let text = show_to_string(&mut view, &DataGrid::default()).await;

    let last = text.lines().last().unwrap();
    assert!(last.starts_with("Could not load entries"), "{last}");
    assert!(last.contains("500"), "{last}");
    assert!(!text.lines().any(|l| l.ends_with(" entries") || l == "1 entry"));
}

#[tokio::test]
async fn empty_list_shows_zero_entries() {
    let mut view = scripted_view(HttpResponse::new(200, "[]"));
    let text = show_to_string(&mut view, &DataGrid::default()).await;
    assert_eq!(text.lines().last(), Some("0 entries"));
}

#[tokio::test]
async fn run_against_mock_server_sorted_by_rating() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));

    let resources = format!("http://{addr}/media/type/Serie");
    let cli = <Cli as clap::Parser>::try_parse_from(["fancyfilms", "--resources", &resources, "--sort", "-rating"])
        .unwrap();
    let mut out = Vec::new();
    run(&cli, &mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    let rows: Vec<&str> = text.lines().skip(5).take(3).collect();
    assert!(rows[0].starts_with("Fargo"), "{text}");
    assert!(rows[1].starts_with("Dark"), "{text}");
    assert!(rows[2].starts_with("Atlanta"), "{text}");
    assert_eq!(text.lines().last(), Some("3 entries"));
}
