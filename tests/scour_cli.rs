use std::error::Error;
use std::fs;

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn cleans_cpp_and_leaves_txt_untouched() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let src_dir = temp.child("src");
    src_dir.create_dir_all()?;

    let main_cpp = src_dir.child("main.cpp");
    main_cpp.write_str(
        "// Entry point\n#include \"Ota.h\"  \n\n\n\n\nvoid setup() { /* init */ }\nconst char* url = \"http://example.com\"; // server\n",
    )?;

    let notes = temp.child("notes.txt");
    let notes_src = "// keep me  \n\n\n\n/* and me */\n";
    notes.write_str(notes_src)?;

    let mut cmd = cargo_bin_cmd!("scour");
    cmd.current_dir(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned C++: src/main.cpp"))
        .stdout(predicate::str::contains("notes.txt").not())
        .stdout(predicate::str::contains(
            "Done: 1 cleaned, 0 failed, 1 skipped.",
        ));

    main_cpp.assert(
        "#include \"Ota.h\"\n\nvoid setup() {  }\nconst char* url = \"http://example.com\";\n",
    );
    notes.assert(notes_src);

    Ok(())
}

#[test]
fn html_keeps_conditional_comments_and_cleans_scripts() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let page = temp.child("index.html");
    page.write_str(
        r#"<html>
<!-- remove me -->
<!--[if IE]><p>x</p><![endif]-->
<pre><!-- literal --></pre>
<script>
// comment
var x = "// not a comment";
</script>
<style>
body { margin: 0; } /* reset */
</style>
</html>
"#,
    )?;

    let mut cmd = cargo_bin_cmd!("scour");
    cmd.current_dir(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned HTML: index.html"));

    page.assert(
        r#"<html>

<!--[if IE]><p>x</p><![endif]-->
<pre><!-- literal --></pre>
<script>

var x = "// not a comment";
</script>
<style>
body { margin: 0; }
</style>
</html>
"#,
    );

    Ok(())
}

#[test]
fn js_and_css_are_cleaned_with_uppercase_extensions() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let js = temp.child("APP.JS");
    js.write_str("const u = `see http://x`; // why\nlet s = '/* kept */';\n")?;
    let css = temp.child("site.css");
    css.write_str("/* header */\na { color: red; }\n")?;

    let mut cmd = cargo_bin_cmd!("scour");
    cmd.current_dir(&temp)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned JS: APP.JS"))
        .stdout(predicate::str::contains("Cleaned CSS: site.css"))
        .stdout(predicate::str::contains("Done: 2 cleaned, 0 failed, 0 skipped."));

    js.assert("const u = `see http://x`;\nlet s = '/* kept */';\n");
    css.assert("a { color: red; }\n");

    Ok(())
}

#[test]
fn non_utf8_file_is_reported_and_run_continues() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let bad = temp.child("bad.js");
    let bad_bytes: &[u8] = b"var a = 1; // \xff\xfe\n";
    bad.write_binary(bad_bytes)?;
    let good = temp.child("good.js");
    good.write_str("var b = 2; // two\n")?;

    let mut cmd = cargo_bin_cmd!("scour");
    cmd.current_dir(&temp)
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping bad.js: failed to read"))
        .stdout(predicate::str::contains("Cleaned JS: good.js"))
        .stdout(predicate::str::contains("Done: 1 cleaned, 1 failed, 0 skipped."));

    assert_eq!(fs::read(bad.path())?, bad_bytes);
    good.assert("var b = 2;\n");

    Ok(())
}

#[test]
fn explicit_root_argument_is_used() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let runner = temp.child("runner");
    runner.create_dir_all()?;
    runner.child("local.js").write_str("x; // stays\n")?;

    let repo = temp.child("repo");
    repo.child("data").create_dir_all()?;
    let header = repo.child("data/WebServer.h");
    header.write_str("#pragma once\n/** server */\nclass WebServer;\n")?;

    let mut cmd = cargo_bin_cmd!("scour");
    cmd.current_dir(&runner)
        .arg(repo.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned C++: data/WebServer.h"))
        .stdout(predicate::str::contains("local.js").not());

    header.assert("#pragma once\n\nclass WebServer;\n");
    runner.child("local.js").assert("x; // stays\n");

    Ok(())
}

#[test]
fn missing_root_is_fatal() -> TestResult {
    let temp = assert_fs::TempDir::new()?;

    let mut cmd = cargo_bin_cmd!("scour");
    cmd.current_dir(&temp)
        .arg("does-not-exist")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Root directory not found"));

    Ok(())
}

#[test]
fn second_run_changes_nothing() -> TestResult {
    let temp = assert_fs::TempDir::new()?;
    let f = temp.child("Control.cc");
    f.write_str("int a; /* x */\n\n\n\nint b;   // y\n")?;

    cargo_bin_cmd!("scour").current_dir(&temp).assert().success();
    let first = fs::read_to_string(f.path())?;

    cargo_bin_cmd!("scour").current_dir(&temp).assert().success();
    f.assert(first.as_str());

    Ok(())
}

#[cfg(unix)]
#[test]
fn symlinked_file_is_cleaned_through_the_link() -> TestResult {
    use std::os::unix::fs::symlink;

    let temp = assert_fs::TempDir::new()?;
    let real = temp.child("real");
    real.create_dir_all()?;
    let target = real.child("a.js");
    target.write_str("x; // y\n")?;

    let root = temp.child("root");
    root.create_dir_all()?;
    symlink("../real/a.js", root.child("link.js").path())?;

    let mut cmd = cargo_bin_cmd!("scour");
    cmd.current_dir(&root)
        .assert()
        .success()
        .stdout(predicate::str::contains("Cleaned JS: link.js"))
        .stdout(predicate::str::contains("Done: 1 cleaned, 0 failed, 0 skipped."));

    target.assert("x;\n");

    Ok(())
}

#[cfg(unix)]
#[test]
fn dangling_symlink_is_a_read_failure() -> TestResult {
    use std::os::unix::fs::symlink;

    let temp = assert_fs::TempDir::new()?;
    symlink("missing.js", temp.child("dangling.js").path())?;
    let good = temp.child("good.css");
    good.write_str("a {} /* x */\n")?;

    let mut cmd = cargo_bin_cmd!("scour");
    cmd.current_dir(&temp)
        .assert()
        .success()
        .stderr(predicate::str::contains("Skipping dangling.js: failed to read"))
        .stdout(predicate::str::contains("Done: 1 cleaned, 1 failed, 0 skipped."));

    good.assert("a {}\n");

    Ok(())
}

#[cfg(target_os = "linux")]
#[test]
fn write_failure_is_reported_and_run_continues() -> TestResult {
    use std::os::unix::fs::symlink;

    let temp = assert_fs::TempDir::new()?;
    // /proc/version reads fine but rejects writes, even for root.
    symlink("/proc/version", temp.child("version.js").path())?;
    let good = temp.child("good.js");
    good.write_str("var b = 2; // two\n")?;

    let mut cmd = cargo_bin_cmd!("scour");
    cmd.current_dir(&temp)
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Skipping version.js: failed to write",
        ))
        .stdout(predicate::str::contains("Cleaned JS: good.js"))
        .stdout(predicate::str::contains("Done: 1 cleaned, 1 failed, 0 skipped."));

    good.assert("var b = 2;\n");

    Ok(())
}
