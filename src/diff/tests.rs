//! Tests for diff parsing.

use super::api::{ChangeKind, ChangedFile, EntryMode};
use super::helpers::{parse_hunk_header, parse_raw_changes};
use super::parser::{DiffHunk, DiffLine, HunkLineTracker, parse_added_lines};
use super::{changed_files, staged_diff};
use crate::error::HookError;
use crate::exec::SystemRunner;
use crate::test_support::{create_test_repo, git, head_sha, stage_file};

#[test]
fn test_parse_simple_added_lines() {
    let diff = r#"diff --git a/lib/App.pm b/lib/App.pm
index abc1234..def5678 100644
--- a/lib/App.pm
+++ b/lib/App.pm
@@ -10,0 +11,2 @@ sub existing {
+    my $x = 42;
+    print "Added line\n";
"#;

    let result = parse_added_lines(diff).unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].line_number, 11);
    assert_eq!(result[0].content, "    my $x = 42;");
    assert_eq!(result[1].line_number, 12);
}

#[test]
fn test_consecutive_additions_get_consecutive_numbers() {
    for (start, count) in [(1usize, 1usize), (7, 3), (120, 6)] {
        let mut diff = format!("@@ -3,2 +{},{} @@\n", start, count);
        for i in 0..count {
            diff.push_str(&format!("+line {}\n", i));
        }

        let numbers: Vec<usize> = parse_added_lines(&diff)
            .unwrap()
            .iter()
            .map(|l| l.line_number)
            .collect();
        let expected: Vec<usize> = (start..start + count).collect();
        assert_eq!(numbers, expected);
    }
}

#[test]
fn test_context_lines_advance_cursor() {
    let diff = "\
@@ -4,4 +4,5 @@
 unchanged one
 unchanged two
+added after context
 unchanged three
+added at end
";
    let result = parse_added_lines(diff).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].line_number, 6);
    assert_eq!(result[1].line_number, 8);
}

#[test]
fn test_removals_do_not_advance_cursor() {
    let diff = "\
@@ -10,3 +10,2 @@
-old one
-old two
+new one
 same
";
    let result = parse_added_lines(diff).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line_number, 10);
    assert_eq!(result[0].content, "new one");
}

#[test]
fn test_parse_multiple_hunks() {
    let diff = "\
--- a/script.pl
+++ b/script.pl
@@ -5,0 +6 @@ sub main {
+    # first addition
@@ -20,0 +22,1 @@ sub helper {
+    # second addition
";

    let result = parse_added_lines(diff).unwrap();

    assert_eq!(result.len(), 2);
    assert_eq!(result[0].line_number, 6);
    assert_eq!(result[1].line_number, 22);
}

#[test]
fn test_file_headers_are_not_additions() {
    let diff = "\
diff --git a/x.pl b/x.pl
new file mode 100644
--- /dev/null
+++ b/x.pl
@@ -0,0 +1,2 @@
+use strict;
+use warnings;
";
    let result = parse_added_lines(diff).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].content, "use strict;");
    assert_eq!(result[0].line_number, 1);
}

#[test]
fn test_plus_plus_content_inside_hunk_is_an_addition() {
    let diff = "\
--- a/notes.txt
+++ b/notes.txt
@@ -1,0 +1,2 @@
+++ counter
+--- divider
";
    let result = parse_added_lines(diff).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result[0].content, "++ counter");
    assert_eq!(result[1].content, "--- divider");
    assert_eq!(result[1].line_number, 2);
}

#[test]
fn test_no_newline_marker_is_ignored() {
    let diff = "\
@@ -1 +1 @@
-old
\\ No newline at end of file
+new
\\ No newline at end of file
";
    let result = parse_added_lines(diff).unwrap();
    assert_eq!(result.len(), 1);
    assert_eq!(result[0].line_number, 1);
    assert_eq!(result[0].content, "new");
}

#[test]
fn test_carriage_return_is_kept_in_content() {
    let diff = "@@ -0,0 +1 @@\n+crlf line\r\n";
    let result = parse_added_lines(diff).unwrap();
    assert_eq!(result[0].content, "crlf line\r");
}

#[test]
fn test_addition_before_hunk_header_is_malformed() {
    let diff = "+orphan line\n@@ -1,0 +1,1 @@\n+fine\n";
    let err = parse_added_lines(diff).unwrap_err();
    assert!(matches!(err, HookError::MalformedDiff(_)));
    assert!(err.to_string().contains("orphan line"));
}

#[test]
fn test_context_before_hunk_header_is_malformed() {
    let err = parse_added_lines(" stray context\n").unwrap_err();
    assert!(matches!(err, HookError::MalformedDiff(_)));
}

#[test]
fn test_removal_before_hunk_header_is_ignored() {
    let result = parse_added_lines("-gone\n").unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_empty_diff_has_no_added_lines() {
    assert!(parse_added_lines("").unwrap().is_empty());
}

#[test]
fn test_classify_variants() {
    let tracker = HunkLineTracker::new();
    assert_eq!(tracker.classify(" same"), DiffLine::Context);
    assert_eq!(tracker.classify("+new"), DiffLine::Addition("new"));
    assert_eq!(tracker.classify("-old"), DiffLine::Removal);
    assert_eq!(tracker.classify("+++ b/file"), DiffLine::Other);
    assert_eq!(tracker.classify("--- a/file"), DiffLine::Other);
    assert_eq!(tracker.classify("index 123..456"), DiffLine::Other);
    assert!(matches!(
        tracker.classify("@@ -1,2 +3,4 @@"),
        DiffLine::HunkHeader(_)
    ));
}

#[test]
fn test_tracker_feed_reports_line_numbers() {
    let mut tracker = HunkLineTracker::new();
    assert!(tracker.feed("@@ -1,1 +40,2 @@").unwrap().is_none());
    assert!(tracker.feed(" keep").unwrap().is_none());
    let added = tracker.feed("+new").unwrap().unwrap();
    assert_eq!(added.line_number, 41);
}

#[test]
fn test_parse_hunk_header_full() {
    let hunk = parse_hunk_header("@@ -10,5 +12,7 @@ sub foo {").unwrap();
    assert_eq!(
        hunk,
        DiffHunk {
            old_start: 10,
            old_len: 5,
            new_start: 12,
            new_len: 7,
        }
    );
}

#[test]
fn test_parse_hunk_header_without_lengths() {
    let hunk = parse_hunk_header("@@ -10 +12 @@").unwrap();
    assert_eq!(hunk.old_len, 1);
    assert_eq!(hunk.new_len, 1);
    assert_eq!(hunk.new_start, 12);
}

#[test]
fn test_parse_hunk_header_rejects_garbage() {
    assert!(parse_hunk_header("@@ garbage @@").is_none());
    assert!(parse_hunk_header("not a header").is_none());
    assert!(parse_hunk_header("@@ -a,b +c,d @@").is_none());
}

const SHA_A: &str = "1111111111111111111111111111111111111111";
const SHA_B: &str = "2222222222222222222222222222222222222222";

fn raw(old_mode: &str, new_mode: &str, status: &str, paths: &[&str]) -> String {
    let mut record = format!(":{} {} {} {} {}\0", old_mode, new_mode, SHA_A, SHA_B, status);
    for path in paths {
        record.push_str(path);
        record.push('\0');
    }
    record
}

#[test]
fn test_parse_raw_changes_records() {
    let output = [
        raw("100644", "100644", "M", &["lib/App.pm"]),
        raw("000000", "100755", "A", &["bin/run"]),
        raw("100644", "100644", "R087", &["old.pl", "new.pl"]),
    ]
    .concat();
    let files = parse_raw_changes(&output).unwrap();
    assert_eq!(
        files,
        vec![
            ChangedFile::new("lib/App.pm", ChangeKind::Modified),
            ChangedFile::new("bin/run", ChangeKind::Added),
            ChangedFile::new(
                "new.pl",
                ChangeKind::Renamed {
                    from: "old.pl".to_string()
                }
            ),
        ]
    );
}

#[test]
fn test_parse_raw_changes_skips_other_statuses() {
    let output = [
        raw("100644", "000000", "D", &["gone.pl"]),
        raw("100644", "100644", "C100", &["a.pl", "b.pl"]),
        raw("100644", "100644", "M", &["kept.pl"]),
    ]
    .concat();
    let files = parse_raw_changes(&output).unwrap();
    assert_eq!(files, vec![ChangedFile::new("kept.pl", ChangeKind::Modified)]);
}

#[test]
fn test_parse_raw_changes_drops_gitlinks_and_marks_symlinks() {
    let output = [
        raw("160000", "160000", "M", &["vendor/lib"]),
        raw("000000", "120000", "A", &["current.pl"]),
        raw("000000", "100644", "A", &["real.pl"]),
    ]
    .concat();
    let files = parse_raw_changes(&output).unwrap();
    assert_eq!(
        files,
        vec![
            ChangedFile::new("current.pl", ChangeKind::Added).with_mode(EntryMode::Symlink),
            ChangedFile::new("real.pl", ChangeKind::Added),
        ]
    );
}

#[test]
fn test_parse_raw_changes_truncated_is_error() {
    let output = raw("100644", "100644", "R100", &["only-source"]);
    let err = parse_raw_changes(&output).unwrap_err();
    assert!(matches!(err, HookError::GitError(_)));
}

#[test]
fn test_parse_raw_changes_bad_header_is_error() {
    let err = parse_raw_changes("M\0lib/App.pm\0").unwrap_err();
    assert!(matches!(err, HookError::GitError(_)));
}

#[test]
fn test_parse_raw_changes_empty() {
    assert!(parse_raw_changes("").unwrap().is_empty());
}

// =========================================================================
// Integration with a real repository
// =========================================================================

#[test]
fn test_changed_files_excludes_deleted() {
    let temp = create_test_repo();
    let repo = temp.path();
    stage_file(repo, "keep.pl", "print 1;\n");
    stage_file(repo, "drop.pl", "print 2;\n");
    git(repo, &["commit", "--no-verify", "-m", "add files"]);

    stage_file(repo, "keep.pl", "print 3;\n");
    stage_file(repo, "new.sql", "select 1;\n");
    git(repo, &["rm", "-q", "drop.pl"]);

    let mut files = changed_files(&SystemRunner, repo).unwrap();
    files.sort_by(|a, b| a.path.cmp(&b.path));
    assert_eq!(
        files,
        vec![
            ChangedFile::new("keep.pl", ChangeKind::Modified),
            ChangedFile::new("new.sql", ChangeKind::Added),
        ]
    );
}

#[test]
fn test_changed_files_ignores_unstaged_edits() {
    let temp = create_test_repo();
    std::fs::write(temp.path().join("README.md"), "# Changed\n").unwrap();
    assert!(changed_files(&SystemRunner, temp.path()).unwrap().is_empty());
}

#[test]
fn test_changed_files_reports_rename() {
    let temp = create_test_repo();
    let repo = temp.path();
    let body = "line one\nline two\nline three\nline four\n";
    stage_file(repo, "old.pl", body);
    git(repo, &["commit", "--no-verify", "-m", "add old"]);
    git(repo, &["mv", "old.pl", "new.pl"]);

    let files = changed_files(&SystemRunner, repo).unwrap();
    assert_eq!(
        files,
        vec![ChangedFile::new(
            "new.pl",
            ChangeKind::Renamed {
                from: "old.pl".to_string()
            }
        )]
    );

    // A pure rename adds no lines.
    let diff = staged_diff(&SystemRunner, repo, &files[0]).unwrap();
    assert!(parse_added_lines(&diff).unwrap().is_empty());
}

#[test]
fn test_staged_diff_line_numbers_match_file() {
    let temp = create_test_repo();
    let repo = temp.path();
    stage_file(repo, "a.pl", "one\ntwo\nthree\nfour\nfive\n");
    git(repo, &["commit", "--no-verify", "-m", "base"]);
    stage_file(repo, "a.pl", "one\ntwo\ninserted\nthree\nfour\nfive\nappended\n");

    let file = ChangedFile::new("a.pl", ChangeKind::Modified);
    let diff = staged_diff(&SystemRunner, repo, &file).unwrap();
    let added = parse_added_lines(&diff).unwrap();

    let numbered: Vec<(usize, &str)> = added
        .iter()
        .map(|l| (l.line_number, l.content.as_str()))
        .collect();
    assert_eq!(numbered, vec![(3, "inserted"), (7, "appended")]);
}

#[test]
fn test_changed_files_skips_submodule_entries() {
    let temp = create_test_repo();
    let repo = temp.path();
    let head = head_sha(repo);
    let cacheinfo = format!("160000,{},vendor/lib", head);
    git(repo, &["update-index", "--add", "--cacheinfo", &cacheinfo]);
    stage_file(repo, "a.pl", "print 1;\n");

    let files = changed_files(&SystemRunner, repo).unwrap();
    assert_eq!(files, vec![ChangedFile::new("a.pl", ChangeKind::Added)]);
}

#[cfg(unix)]
#[test]
fn test_changed_files_marks_symlinks() {
    let temp = create_test_repo();
    let repo = temp.path();
    std::os::unix::fs::symlink("README.md", repo.join("current.pl")).unwrap();
    git(repo, &["add", "current.pl"]);

    let files = changed_files(&SystemRunner, repo).unwrap();
    assert_eq!(
        files,
        vec![ChangedFile::new("current.pl", ChangeKind::Added).with_mode(EntryMode::Symlink)]
    );
}

#[test]
fn test_staged_diff_treats_glob_characters_literally() {
    let temp = create_test_repo();
    let repo = temp.path();
    stage_file(repo, "[ab].txt", "clean\n");
    stage_file(repo, "a.txt", "x\ny\nz\nbad \n");

    let diff = staged_diff(
        &SystemRunner,
        repo,
        &ChangedFile::new("[ab].txt", ChangeKind::Added),
    )
    .unwrap();
    let added = parse_added_lines(&diff).unwrap();

    assert_eq!(added.len(), 1);
    assert_eq!(added[0].content, "clean");
}
