use crate::{
    note::{create_note, deleted_note_id, note_path, unique_title, Note},
    scenarios::*,
};
use notetest::{
    api_test, assert_json_content_type, assert_note_shape, assert_status, assert_status_in,
    try_json, Error, TestContext,
};

#[api_test(LIST_NOTES)]
fn lists_all_notes(ctx: &mut TestContext) -> Result<(), Error> {
    // the reference service answers 404 while it holds no notes
    let note = ctx.step("Create a note to list", |session| {
        create_note(session, &unique_title("Listed note"), "Listed")
    })?;

    let response = ctx.step("Send GET /notes", |session| session.get("/notes").send())?;

    ctx.step("Check status 200 OK", |_| assert_status(&response, 200));
    ctx.step("Check Content-Type", |_| assert_json_content_type(&response));
    ctx.step("Check the list shape", |_| {
        let notes = try_json(&response);
        let notes = notes
            .as_ref()
            .and_then(|value| value.as_array())
            .unwrap_or_else(|| panic!("expected a JSON array, got {}", response.text()));

        for value in notes {
            assert_note_shape(Some(value));
        }
        assert!(
            notes.iter().any(|value| value["id"] == note.id),
            "note {} missing from the list",
            note.id
        );
    });

    Ok(())
}

#[api_test(READ_NOTE)]
fn reads_a_note_by_id(ctx: &mut TestContext) -> Result<(), Error> {
    let created = ctx.step("Create a note", |session| {
        create_note(session, &unique_title("Readable note"), "Readable")
    })?;

    let response = ctx.step(&format!("Send GET /note/{}", created.id), |session| {
        session.get(note_path(created.id)).send()
    })?;

    ctx.step("Check status 200 OK", |_| assert_status(&response, 200));
    ctx.step("Check Content-Type", |_| assert_json_content_type(&response));
    ctx.step("Check the returned note", |_| {
        let note: Note = response.json()?;
        assert_eq!(note, created);
        Ok::<(), Error>(())
    })
}

#[api_test(READ_UNKNOWN_NOTE)]
fn unknown_ids_are_not_found(ctx: &mut TestContext) -> Result<(), Error> {
    let id = ctx.step("Pick an id nobody owns", deleted_note_id)?;

    let response = ctx.step(&format!("Send GET /note/{}", id), |session| {
        session.get(note_path(id)).send()
    })?;

    ctx.step("Check status 404 Not Found", |_| {
        assert_status_in(&response, &[404, 409]);
    });

    Ok(())
}

#[api_test(READ_MALFORMED_ID)]
fn malformed_ids_are_rejected(ctx: &mut TestContext) -> Result<(), Error> {
    let response = ctx.step("Send GET /note/not-a-number", |session| {
        session.get(note_path("not-a-number")).send()
    })?;

    ctx.step("Check the id is rejected", |_| {
        assert_status_in(&response, &[404, 409]);
    });

    Ok(())
}
