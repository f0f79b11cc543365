//! End-to-end board scenarios against the CSV store.
//!
//! Each test opens a controller over a board file in its own temp dir,
//! drives it through the public operations, then reopens the file to check
//! what was persisted.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use kanban_core::store::SEED_TASK_NAME;
use kanban_core::{BoardController, CsvStore, KanbanError, Status, Store, Subtask};
use tempfile::TempDir;

const TIMEOUT: Duration = Duration::from_millis(200);

fn board_path(dir: &TempDir) -> PathBuf {
    dir.path().join("kanban_com_subtarefas.csv")
}

fn open(path: &Path) -> BoardController<CsvStore> {
    let store = CsvStore::open(path, TIMEOUT).expect("open store");
    BoardController::open(store).expect("load board")
}

fn reload(ctl: BoardController<CsvStore>) -> kanban_core::Board {
    let path = ctl.store().path().to_path_buf();
    drop(ctl);
    let mut store = CsvStore::open(path, TIMEOUT).expect("reopen store");
    store.load().expect("reload board")
}

#[test]
fn first_run_writes_seed_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = board_path(&dir);

    let ctl = open(&path);
    assert!(path.exists());
    assert_eq!(ctl.board().len(), 1);
    assert_eq!(ctl.task(SEED_TASK_NAME).unwrap().status, Status::Todo);
}

#[test]
fn three_subtasks_progress_to_done_and_survive_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctl = open(&board_path(&dir));

    ctl.add_task("Mudança", "Casa", "Alta", "Caixas;Transporte;Limpeza")
        .unwrap();
    assert_eq!(ctl.toggle_subtask("Mudança", 0, true).unwrap(), Status::InProgress);
    assert_eq!(ctl.toggle_subtask("Mudança", 1, true).unwrap(), Status::InProgress);
    assert_eq!(ctl.toggle_subtask("Mudança", 2, true).unwrap(), Status::Done);

    let expected = ctl.task("Mudança").unwrap().clone();
    let reloaded = reload(ctl);
    assert_eq!(reloaded.find_by_name("Mudança"), Some(&expected));
}

#[test]
fn override_is_persisted_and_undone_by_next_toggle() {
    let dir = tempfile::tempdir().unwrap();
    let path = board_path(&dir);
    let mut ctl = open(&path);

    ctl.add_task("Relatório", "Trabalho", "high", "Rascunho").unwrap();
    ctl.toggle_subtask("Relatório", 0, true).unwrap();
    ctl.move_task("Relatório", Status::Todo).unwrap();

    let board = reload(ctl);
    let task = board.find_by_name("Relatório").unwrap();
    assert_eq!(task.status, Status::Todo);
    assert_eq!(task.subtasks, vec![Subtask::new("Rascunho", true)]);

    let mut ctl = open(&path);
    assert_eq!(ctl.toggle_subtask("Relatório", 0, true).unwrap(), Status::Done);
}

#[test]
fn add_subtask_to_done_task_keeps_column_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctl = open(&board_path(&dir));

    ctl.add_task("T", "c", "low", "a").unwrap();
    ctl.toggle_subtask("T", 0, true).unwrap();
    ctl.add_subtask("T", "b").unwrap();

    let board = reload(ctl);
    let task = board.find_by_name("T").unwrap();
    assert_eq!(task.status, Status::Done);
    assert_eq!(task.progress(), (1, 2));
}

#[test]
fn removing_unknown_task_leaves_file_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = board_path(&dir);
    let mut ctl = open(&path);
    ctl.add_task("Keep", "c", "medium", "x").unwrap();
    let before = fs::read(&path).unwrap();
    let board_before = ctl.board().clone();

    let err = ctl.remove_task("Ghost").unwrap_err();
    assert!(matches!(err, KanbanError::TaskNotFound { .. }));

    assert_eq!(fs::read(&path).unwrap(), before);
    assert_eq!(reload(ctl), board_before);
}

#[test]
fn removed_task_is_gone_after_reload() {
    let dir = tempfile::tempdir().unwrap();
    let mut ctl = open(&board_path(&dir));

    ctl.remove_task(SEED_TASK_NAME).unwrap();
    assert!(reload(ctl).is_empty());
}

#[test]
fn wire_format_is_bit_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = board_path(&dir);
    let mut ctl = open(&path);

    ctl.add_task("Design doc", "Work", "HIGH", "Draft;Review").unwrap();
    ctl.toggle_subtask("Design doc", 0, true).unwrap();
    ctl.add_task("Férias", "Pessoal", "baixa", "Passagens").unwrap();
    ctl.move_task("Férias", Status::Done).unwrap();
    drop(ctl);

    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Tarefa,Status,Categoria,Prioridade,Subtarefas\n\
         Tarefa Exemplo,A FAZER,Geral,Média,Sub1:False;Sub2:False\n\
         Design doc,EM ANDAMENTO,Work,Alta,Draft:True;Review:False\n\
         Férias,CONCLUÍDO,Pessoal,Baixa,Passagens:False\n"
    );
}

#[test]
fn legacy_file_with_colon_in_label_loads() {
    let dir = tempfile::tempdir().unwrap();
    let path = board_path(&dir);
    fs::write(
        &path,
        "Tarefa,Status,Categoria,Prioridade,Subtarefas\n\
         Reunião,EM ANDAMENTO,Trabalho,Média,Sala 10:30:True;Pauta:False\n",
    )
    .unwrap();

    let ctl = open(&path);
    let task = ctl.task("Reunião").unwrap();
    assert_eq!(
        task.subtasks,
        vec![Subtask::new("Sala 10:30", true), Subtask::unchecked("Pauta")]
    );
}
