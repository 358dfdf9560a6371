//! # Templates
//!
//! HTML page served by the help endpoint.

const HELP_PAGE: &str = r#"<!DOCTYPE html>
<html>
  <head>
  <meta charset="utf-8">
  <title>{name} Help</title>
  <style type="text/css">
    body {
      background: #d3d6d9;
      color: #636c75;
      text-shadow: 0 1px 1px rgba(255, 255, 255, .5);
      font-family: Helvetica, Arial, sans-serif;
    }
    h1 {
      margin: 8px 0;
      padding: 0;
    }
    .commands {
      font-size: 13px;
    }
    p {
      border-bottom: 1px solid #eee;
      margin: 6px 0 0 0;
      padding-bottom: 5px;
    }
    p:last-child {
      border: 0;
    }
  </style>
  </head>
  <body>
    <h1>{name} Help</h1>
    <div class="commands">
      {commands}
    </div>
  </body>
</html>"#;

/// `commands` must already be escaped HTML.
pub fn help_page(name: &str, commands: &str) -> String {
    let name = crate::application::render::escape_html(name);
    HELP_PAGE
        .replace("{name}", &name)
        .replace("{commands}", commands)
}
