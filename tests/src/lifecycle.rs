use crate::{
    note::{note_path, Note},
    scenarios::*,
};
use notetest::{api_test, assert_note_shape, assert_status, try_json, Error, TestContext};
use serde_json::json;

#[api_test(NOTE_LIFECYCLE)]
fn create_read_delete_and_verify(ctx: &mut TestContext) -> Result<(), Error> {
    let session = ctx.session();

    let response = session
        .post("/note")
        .json(&json!({"title": "A", "content": "B"}))
        .send()?;
    assert_status(&response, 201);
    assert_note_shape(try_json(&response).as_ref());
    let created: Note = response.json()?;

    let response = session.get(note_path(created.id)).send()?;
    assert_status(&response, 200);
    assert_eq!(response.json::<Note>()?.title, "A");

    let response = session.delete(note_path(created.id)).send()?;
    assert_status(&response, 204);

    let response = session.get(note_path(created.id)).send()?;
    assert_status(&response, 404);

    Ok(())
}
