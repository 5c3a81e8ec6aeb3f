pub use self::editor::EditorScreen;

mod editor;
