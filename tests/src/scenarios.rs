use notetest::Scenario;

pub const NOTES: &str = "Notes management";

pub const CREATE: &str = "Create note";
pub const LIST: &str = "List notes";
pub const READ: &str = "Read note by id";
pub const UPDATE: &str = "Update note";
pub const SEARCH: &str = "Search note by title";
pub const DELETE: &str = "Delete note";
pub const LIFECYCLE: &str = "Note lifecycle";

pub const CREATE_NOTE: Scenario = Scenario::new(
    "notes::create::valid",
    NOTES,
    CREATE,
    "Successful note creation",
    201,
);
pub const CREATE_WITHOUT_TITLE: Scenario = Scenario::new(
    "notes::create::without_title",
    NOTES,
    CREATE,
    "Creating a note without a title",
    409,
);
pub const CREATE_WITHOUT_CONTENT: Scenario = Scenario::new(
    "notes::create::without_content",
    NOTES,
    CREATE,
    "Creating a note without content",
    409,
);
pub const CREATE_WITHOUT_DATA: Scenario = Scenario::new(
    "notes::create::without_data",
    NOTES,
    CREATE,
    "Creating a note without any data",
    409,
);
pub const CREATE_WITH_EMPTY_FIELDS: Scenario = Scenario::new(
    "notes::create::empty_fields",
    NOTES,
    CREATE,
    "Creating a note with an empty title and content",
    409,
);

pub const LIST_NOTES: Scenario =
    Scenario::new("notes::list", NOTES, LIST, "Listing all notes", 200);

pub const READ_NOTE: Scenario = Scenario::new(
    "notes::read::existing",
    NOTES,
    READ,
    "Reading a note by an existing id",
    200,
);
pub const READ_UNKNOWN_NOTE: Scenario = Scenario::new(
    "notes::read::unknown",
    NOTES,
    READ,
    "Reading a note by an unknown id",
    404,
);
pub const READ_MALFORMED_ID: Scenario = Scenario::new(
    "notes::read::malformed_id",
    NOTES,
    READ,
    "Reading a note by a malformed id",
    404,
);

pub const UPDATE_NOTE: Scenario = Scenario::new(
    "notes::update::valid",
    NOTES,
    UPDATE,
    "Updating a note by id",
    204,
);
pub const UPDATE_WITHOUT_DATA: Scenario = Scenario::new(
    "notes::update::without_data",
    NOTES,
    UPDATE,
    "Updating a note without data",
    204,
);
pub const UPDATE_UNKNOWN_NOTE: Scenario = Scenario::new(
    "notes::update::unknown",
    NOTES,
    UPDATE,
    "Updating a note by an unknown id",
    409,
);

pub const SEARCH_BY_TITLE: Scenario = Scenario::new(
    "notes::search::existing",
    NOTES,
    SEARCH,
    "Searching a note by an existing title",
    200,
);
pub const SEARCH_UNKNOWN_TITLE: Scenario = Scenario::new(
    "notes::search::unknown",
    NOTES,
    SEARCH,
    "Searching a note by an unknown title",
    404,
);

pub const DELETE_NOTE: Scenario = Scenario::new(
    "notes::delete::existing",
    NOTES,
    DELETE,
    "Deleting a note by an existing id",
    204,
);
pub const DELETE_UNKNOWN_NOTE: Scenario = Scenario::new(
    "notes::delete::unknown",
    NOTES,
    DELETE,
    "Deleting a note by an unknown id",
    409,
);
pub const DELETE_MALFORMED_ID: Scenario = Scenario::new(
    "notes::delete::malformed_id",
    NOTES,
    DELETE,
    "Deleting a note by a malformed id",
    409,
);

pub const NOTE_LIFECYCLE: Scenario = Scenario::new(
    "notes::lifecycle",
    NOTES,
    LIFECYCLE,
    "Create, read, delete and verify a note",
    201,
);

/// Every scenario of the suite.
pub const ALL: &[Scenario] = &[
    CREATE_NOTE,
    CREATE_WITHOUT_TITLE,
    CREATE_WITHOUT_CONTENT,
    CREATE_WITHOUT_DATA,
    CREATE_WITH_EMPTY_FIELDS,
    LIST_NOTES,
    READ_NOTE,
    READ_UNKNOWN_NOTE,
    READ_MALFORMED_ID,
    UPDATE_NOTE,
    UPDATE_WITHOUT_DATA,
    UPDATE_UNKNOWN_NOTE,
    SEARCH_BY_TITLE,
    SEARCH_UNKNOWN_TITLE,
    DELETE_NOTE,
    DELETE_UNKNOWN_NOTE,
    DELETE_MALFORMED_ID,
    NOTE_LIFECYCLE,
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn scenario_names_are_unique() {
        let names: HashSet<&str> = ALL.iter().map(|scenario| scenario.name).collect();

        assert_eq!(names.len(), ALL.len());
    }

    #[test]
    fn rejected_creations_expect_conflict() {
        for scenario in ALL.iter().filter(|scenario| scenario.story == CREATE) {
            if scenario.name != CREATE_NOTE.name {
                assert_eq!(scenario.expected_status, 409, "{}", scenario.name);
            }
        }
    }
}
