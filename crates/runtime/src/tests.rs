use crate::{ChildTableDataSource, TableDataSource, TableView, ViewError};
use rowtree_core::node::{RowKey, TreeNodeView};
use rowtree_core::provider::TableRow;
use rowtree_core::query::{FieldPath, Page, QueryState};
use rowtree_provider_mock::{
    ExampleChildProvider, ExampleRootProvider, StaticExampleTree, install_example_tree,
};
use rstest::{fixture, rstest};
use serial_test::serial;
use std::sync::Arc;

const NESTED_XML: &str = r#"
<tree>
  <node name="settings">
    <children>
      <node name="display">
        <children>
          <node name="brightness" write_access="clientModify"/>
          <node name="contrast" write_access="clientModify"/>
        </children>
      </node>
      <node name="sound" write_access="clientModify"/>
    </children>
  </node>
  <node name="about"/>
</tree>
"#;

fn nested_tree() -> StaticExampleTree {
    StaticExampleTree::from_xml(NESTED_XML).expect("valid tree")
}

fn name_search(text: &str) -> QueryState {
    QueryState::new().with_search(text, vec![FieldPath::parse("name").expect("valid path")])
}

fn labels(view: &TableView) -> Vec<(usize, &str)> {
    view.visible_rows().iter().map(|row| (row.depth, row.label.as_str())).collect()
}

fn names(rows: &[TreeNodeView]) -> Vec<&str> {
    rows.iter().map(TreeNodeView::name).collect()
}

#[fixture]
fn roots() -> TableDataSource {
    TableDataSource::new(Arc::new(ExampleRootProvider::with_tree(StaticExampleTree::default())))
}

#[fixture]
fn child_provider() -> Arc<ExampleChildProvider> {
    Arc::new(ExampleChildProvider::with_tree(StaticExampleTree::default()))
}

#[fixture]
fn view() -> TableView {
    let tree = nested_tree();
    let mut view = TableView::new(
        Arc::new(ExampleRootProvider::with_tree(tree.clone())),
        Arc::new(ExampleChildProvider::with_tree(tree)),
    );
    view.apply(QueryState::new()).expect("initial load");
    view
}

#[rstest]
fn root_source_tracks_state_and_total(mut roots: TableDataSource) {
    let rows = roots.fetch(name_search("prof")).expect("fetch");
    assert_eq!(names(rows), ["profile"]);
    assert_eq!(roots.total_items(), 1);
    assert_eq!(roots.state().search_text(), "prof");

    roots.fetch(QueryState::new()).expect("fetch");
    assert_eq!(roots.total_items(), 3);
    assert_eq!(roots.table_rows().iter().map(TableRow::level).max(), Some(0));
}

#[rstest]
fn expand_fetches_only_new_rows(mut roots: TableDataSource, child_provider: Arc<ExampleChildProvider>) {
    roots.refresh().expect("fetch");
    let mut source = ChildTableDataSource::new(child_provider.clone());
    let rows = roots.table_rows();

    assert_eq!(source.expand(&rows[1..]).expect("expand"), 2);
    assert_eq!(source.expand(&rows).expect("expand"), 1);
    assert_eq!(source.expand(&rows).expect("expand"), 0);

    assert_eq!(source.children(rows[1].key()).map(names), Some(vec!["color"]));
    assert_eq!(source.children(rows[0].key()).map(<[TreeNodeView]>::len), Some(0));
    assert_eq!(child_provider.cache_fills(), 3);
}

#[rstest]
fn state_change_refetches_expanded_rows(
    mut roots: TableDataSource,
    child_provider: Arc<ExampleChildProvider>,
) {
    roots.refresh().expect("fetch");
    let mut source = ChildTableDataSource::new(child_provider.clone());
    let profile = roots.table_rows().into_iter().find(|row| row.value().name() == "profile").expect("profile");
    source.expand(std::slice::from_ref(&profile)).expect("expand");

    let paged = QueryState::new().with_page(Page::new(2, 2).expect("valid page"));
    source.set_state(paged).expect("reload");
    assert_eq!(source.children(profile.key()).map(names), Some(vec!["lastName"]));
    assert_eq!(source.children_count(&profile).expect("count"), 3);
    assert_eq!(source.page_count(&profile).expect("pages"), Some(2));
    assert_eq!(child_provider.cache_fills(), 1);
}

#[rstest]
fn invalidate_reloads_only_that_row(
    mut roots: TableDataSource,
    child_provider: Arc<ExampleChildProvider>,
) {
    roots.refresh().expect("fetch");
    let rows = roots.table_rows();
    let mut source = ChildTableDataSource::new(child_provider.clone());
    source.expand(&rows).expect("expand");
    assert_eq!(child_provider.cache_fills(), 3);

    source.invalidate(rows[2].key()).expect("invalidate");
    assert_eq!(child_provider.cache_fills(), 4);
    assert_eq!(source.children(rows[2].key()).map(<[TreeNodeView]>::len), Some(3));

    source.invalidate(&RowKey::from("collapsed/elsewhere")).expect("invalidate");
    assert_eq!(child_provider.cache_fills(), 4);

    source.invalidate_all().expect("invalidate all");
    assert_eq!(child_provider.cache_fills(), 7);
}

#[rstest]
fn table_view_flattens_expanded_rows(mut view: TableView) {
    assert_eq!(labels(&view), [(0, "settings"), (0, "about")]);

    view.toggle_index(0, true).expect("expand settings");
    assert_eq!(labels(&view), [(0, "settings"), (1, "display"), (1, "sound"), (0, "about")]);

    view.toggle_index(1, true).expect("expand display");
    assert_eq!(
        labels(&view),
        [
            (0, "settings"),
            (1, "display"),
            (2, "brightness"),
            (2, "contrast"),
            (1, "sound"),
            (0, "about"),
        ]
    );
    assert!(view.visible_rows()[2].selectable);
    assert!(view.visible_rows()[1].is_expanded);
}

#[rstest]
fn collapsing_a_row_collapses_its_descendants(mut view: TableView) {
    view.toggle_index(0, true).expect("expand settings");
    view.toggle_index(1, true).expect("expand display");
    view.toggle_index(0, false).expect("collapse settings");

    assert_eq!(labels(&view), [(0, "settings"), (0, "about")]);
    assert!(!view.children().is_expanded(&RowKey::from("settings/display")));

    view.toggle_index(0, true).expect("expand settings again");
    assert_eq!(labels(&view).len(), 4, "display stays collapsed");
}

#[rstest]
fn toggling_leaves_and_missing_rows(mut view: TableView) {
    view.toggle_index(1, true).expect("leaf toggle is a no-op");
    assert_eq!(labels(&view).len(), 2);

    let err = view.toggle_index(9, true).expect_err("out of range");
    assert!(matches!(err, ViewError::NoSuchRow(9)));
}

#[rstest]
fn search_applies_to_roots_and_expanded_children(mut view: TableView) {
    view.expand_visible().expect("expand roots");
    view.expand_visible().expect("expand second level");
    assert_eq!(labels(&view).len(), 6);

    view.apply(name_search("s")).expect("search");
    assert_eq!(labels(&view), [(0, "settings"), (1, "display"), (2, "brightness"), (2, "contrast"), (1, "sound")]);

    view.apply(name_search("t")).expect("search");
    assert_eq!(labels(&view), [(0, "settings"), (0, "about")], "display no longer matches");
    assert!(view.children().is_expanded(&RowKey::from("settings/display")));
}

#[rstest]
#[serial]
fn view_over_installed_tree() {
    let _guard = install_example_tree(nested_tree());
    let mut view = TableView::new(
        Arc::new(ExampleRootProvider::new()),
        Arc::new(ExampleChildProvider::new()),
    );
    view.apply(QueryState::new()).expect("load");
    assert_eq!(view.roots().total_items(), 2);
    assert_eq!(view.expand_visible().expect("expand"), 1);
}
