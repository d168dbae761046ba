pub mod named_clipboard;
