// End-to-end sessions driven through TaskController::execute.
use std::fs;
use taskline::context::{AppContext, TestContext};
use taskline::controller::TaskController;
use taskline::store::EMPTY_LIST_MESSAGE;

fn open(ctx: &TestContext) -> TaskController {
    TaskController::open(ctx.get_task_file_path().unwrap()).unwrap()
}

fn file_lines(c: &TaskController) -> Vec<String> {
    fs::read_to_string(c.storage().path())
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_todo_lifecycle() {
    let ctx = TestContext::new();
    let mut c = open(&ctx);

    let reply = c.execute("todo Read book /priority LOW").unwrap();
    assert!(reply.contains("[T][ ] Read book (priority: Low)"), "{reply}");
    assert!(reply.ends_with("Now you have 1 task in the list."));
    assert_eq!(file_lines(&c), vec!["T | false | LOW | Read book"]);

    let listing = c.execute("list").unwrap();
    assert!(listing.contains("1. [T][ ] Read book (priority: Low)"), "{listing}");

    let marked = c.execute("mark 1").unwrap();
    assert!(marked.contains("[T][X] Read book"), "{marked}");
    assert_eq!(file_lines(&c), vec!["T | true | LOW | Read book"]);

    let unmarked = c.execute("unmark 1").unwrap();
    assert!(unmarked.contains("[T][ ] Read book"), "{unmarked}");

    let removed = c.execute("delete 1").unwrap();
    assert!(removed.ends_with("Now you have 0 tasks in the list."), "{removed}");
    assert_eq!(
        c.execute("list").unwrap(),
        format!("Here are the tasks in your list:\n{EMPTY_LIST_MESSAGE}")
    );
    assert!(file_lines(&c).is_empty());
}

#[test]
fn test_deadline_is_stored_as_typed_and_shown_friendly() {
    let ctx = TestContext::new();
    let mut c = open(&ctx);

    let reply = c
        .execute("deadline Submit report /by 2025-09-15 1800 /priority HIGH")
        .unwrap();
    assert!(
        reply.contains("[D][ ] Submit report (priority: High) (by: 15 September 2025 6:00 pm)"),
        "{reply}"
    );
    assert_eq!(
        file_lines(&c),
        vec!["D | false | HIGH | Submit report | 2025-09-15 1800"]
    );
}

#[test]
fn test_bad_date_adds_nothing() {
    let ctx = TestContext::new();
    let mut c = open(&ctx);

    let err = c
        .execute("deadline X /by bad-date /priority LOW")
        .unwrap_err();
    assert!(err.starts_with("Urm... Input correct date format"), "{err}");
    assert!(c.tasks().is_empty());
    assert!(file_lines(&c).is_empty());
}

#[test]
fn test_out_of_range_numbers_change_nothing() {
    let ctx = TestContext::new();
    let mut c = open(&ctx);
    c.execute("todo only one /priority m").unwrap();

    for input in ["mark 2", "unmark 5", "delete 2"] {
        let err = c.execute(input).unwrap_err();
        assert!(err.starts_with("Urm... Please input a valid task number."), "{err}");
    }
    assert_eq!(file_lines(&c), vec!["T | false | MEDIUM | only one"]);
}

#[test]
fn test_tasks_survive_a_restart() {
    let ctx = TestContext::new();
    let before = {
        let mut c = open(&ctx);
        c.execute("todo a | b \\ c /priority L").unwrap();
        c.execute("deadline tax /by 2026-04-30 2359 /priority H").unwrap();
        c.execute("event trip /from Fri - night /to Sun /priority M").unwrap();
        c.execute("mark 2").unwrap();
        c.execute("bye").unwrap();
        assert!(c.is_finished());
        c.execute("list").unwrap()
    };

    let mut reopened = open(&ctx);
    assert_eq!(reopened.tasks().len(), 3);
    assert_eq!(reopened.execute("list").unwrap(), before);
    assert!(before.contains("3. [E][ ] trip (priority: Medium) (from: Fri - night to: Sun)"));
}

#[test]
fn test_line_breaks_in_user_text_keep_file_and_list_aligned() {
    let ctx = TestContext::new();
    let mut c = open(&ctx);

    c.execute("todo a\nb /priority L").unwrap();
    c.execute("event x\r\ny /from 1\n2 /to 3 /priority H").unwrap();
    c.execute("todo c /priority L").unwrap();
    assert_eq!(file_lines(&c).len(), c.tasks().len());

    c.execute("delete 2").unwrap();
    c.execute("mark 2").unwrap();
    assert_eq!(
        file_lines(&c),
        vec!["T | false | LOW | a\\nb", "T | true | LOW | c"]
    );

    let listing = c.execute("list").unwrap();
    let reopened_listing = open(&ctx).execute("list").unwrap();
    assert_eq!(reopened_listing, listing);
    assert!(listing.ends_with("1. [T][ ] a\nb (priority: Low)\n2. [T][X] c (priority: Low)"));
}

#[test]
fn test_find_numbers_matches_from_one() {
    let ctx = TestContext::new();
    let mut c = open(&ctx);
    c.execute("todo read book /priority L").unwrap();
    c.execute("todo buy milk /priority L").unwrap();
    c.execute("todo return book /priority H").unwrap();

    assert_eq!(
        c.execute("find book").unwrap(),
        "Here are the matching tasks in your list:\n 1.[T][ ] read book (priority: Low)\n 2.[T][ ] return book (priority: High)"
    );
    assert_eq!(
        c.execute("find Book").unwrap(),
        "No matching tasks found in your list."
    );
}

#[test]
fn test_corrupt_lines_are_set_aside_so_numbers_stay_aligned() {
    let ctx = TestContext::new();
    let path = ctx.get_task_file_path().unwrap();
    fs::write(
        &path,
        "T | false | LOW | first\nX | what\n\nT | false | HIGH | second\nD | false | LOW | bad | soon\n",
    )
    .unwrap();

    let mut c = TaskController::open(&path).unwrap();
    assert_eq!(c.tasks().len(), 2);

    c.execute("mark 2").unwrap();
    assert_eq!(
        file_lines(&c),
        vec!["T | false | LOW | first", "T | true | HIGH | second"]
    );
    let rejected = fs::read_to_string(c.storage().rejected_path()).unwrap();
    assert_eq!(rejected, "X | what\nD | false | LOW | bad | soon\n");
}
