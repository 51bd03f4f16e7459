pub mod listbox;
