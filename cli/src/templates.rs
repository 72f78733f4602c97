//! Project templates scaffolded by `qore create-project`.

use qore_sdk::QoreError;
use std::path::Path;

pub const DEFAULT_TEMPLATE: &str = "todo-list-typescript";

/// One file of a template, relative to the project directory. `{{name}}` is replaced by the project name.
pub struct TemplateFile {
    pub path: &'static str,
    pub contents: &'static str,
}

pub struct Template {
    pub name: &'static str,
    pub files: &'static [TemplateFile],
}

const TODO_LIST_TYPESCRIPT: Template = Template {
    name: "todo-list-typescript",
    files: &[
        TemplateFile {
            path: "package.json",
            contents: r#"{
  "name": "{{name}}",
  "version": "0.1.0",
  "private": true,
  "scripts": {
    "codegen": "qore codegen",
    "build": "tsc",
    "start": "node dist/index.js"
  },
  "devDependencies": {
    "typescript": "^4.9.0"
  }
}
"#,
        },
        TemplateFile {
            path: "tsconfig.json",
            contents: r#"{
  "compilerOptions": {
    "target": "es2019",
    "module": "commonjs",
    "strict": true,
    "outDir": "dist"
  },
  "include": ["src", "qore-generated.ts"]
}
"#,
        },
        TemplateFile {
            path: "src/index.ts",
            contents: r#"import config from "../qore.config.json";
import type { QoreProjectSchema } from "../qore-generated";

type Task = QoreProjectSchema["allTasks"]["read"];

export function describe(task: Task): string {
  return `${task.id}: ${task.title}`;
}

console.log(`{{name}} connected to ${config.projectId}`);
"#,
        },
        TemplateFile {
            path: ".gitignore",
            contents: "node_modules\ndist\n",
        },
        TemplateFile {
            path: "README.md",
            contents: "# {{name}}\n\nRun `qore codegen` after changing the project schema to refresh `qore-generated.ts`.\n",
        },
    ],
};

pub const TEMPLATES: &[Template] = &[TODO_LIST_TYPESCRIPT];

pub fn available() -> Vec<String> {
    TEMPLATES.iter().map(|t| t.name.to_string()).collect()
}

/// Look a template up by name; unknown names list the available ones.
pub fn find(name: &str) -> Result<&'static Template, QoreError> {
    TEMPLATES
        .iter()
        .find(|t| t.name == name)
        .ok_or_else(|| QoreError::InvalidTemplate {
            name: name.to_string(),
            available: available(),
        })
}

impl Template {
    /// Write every file under `dir`, creating directories as needed.
    pub async fn scaffold(&self, dir: &Path, project_name: &str) -> std::io::Result<()> {
        for file in self.files {
            let path = dir.join(file.path);
            if let Some(parent) = path.parent() {
                tokio::fs::create_dir_all(parent).await?;
            }
            tokio::fs::write(&path, file.contents.replace("{{name}}", project_name)).await?;
        }
        tracing::debug!(template = self.name, dir = %dir.display(), files = self.files.len(), "scaffolded template");
        Ok(())
    }
}
