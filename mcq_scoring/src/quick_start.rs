/*!

# Quick start with Google Forms

This example shows how to grade an exam end to end, using an online form to
collect the answers. It uses Google Forms because it is free to use and its
spreadsheet export matches the default column layout expected by `mcqgrade`.
Other providers (Microsoft, Qualtrics) produce similar exports; the
`--id-column` and `--first-answer-column` flags adapt the reader to them.

**Collecting the answers** Create a form with one multiple-choice question
per exam question, in exam order, and make the students fill in their roll
number in a short-answer field. After the exam is closed, open `Responses`
and use the `Create spreadsheet` option, then download the sheet in either
the Excel format (xlsx) or as comma-separated values (csv). The export
starts with a few metadata columns (timestamp, email address, name, roll
number and so on) followed by one column per question. By default
`mcqgrade` takes the identifier from the first column and the answers from
the seventh column onwards.

**The answer key** The grader takes the key from the first data row of the
response sheet. The simplest way to provide it is to fill in the form once
yourself, first, with the correct answers. Any value in its identifier cell
is fine as long as it does not collide with a student roll number.

**The roster** The roster is a separate table of all enrolled students with
a `roll` and a `name` column. Every roster entry is graded: students
without a response row get an all-zero mark sheet.

Run `mcqgrade` with the two files:

```bash
mcqgrade -r master_roll.csv -i responses.csv -o output --exam quiz
```

You should see the cohort being graded:

```text
[2023-03-04T10:12:41Z INFO  mcqgrade::grading] run_grading: reading the roster from master_roll.csv
[2023-03-04T10:12:41Z INFO  mcqgrade::grading] run_grading: 4 students on the roster
[2023-03-04T10:12:41Z INFO  mcqgrade::grading] run_grading: 10 questions on the key, 3 submissions
[2023-03-04T10:12:41Z INFO  mcq_scoring] Grading over 10 questions, marking scheme: MarkingScheme { correct: 5, wrong: 1, unattempted: 0 }
[2023-03-04T10:12:42Z WARN  mcqgrade::grading] run_grading: no submission found for 1901CS04, marking absent
[2023-03-04T10:12:42Z INFO  mcqgrade::grading] run_grading: wrote 4 mark sheets and the summary to "output/concise_marksheet.xlsx"
```

The output directory now holds one `<roll>.xlsx` mark sheet per roster
entry and a `concise_marksheet.xlsx` with one summary row per student.

**Machine-readable summary** The same summary can be written as JSON with
the `--out` flag:

```bash
mcqgrade -r master_roll.csv -i responses.csv -o output --out summary.json
```

Scoring is a pure function of the key and the responses, so re-running the
pipeline on the same inputs always produces the same summary. The
`--reference` flag checks exactly that: it compares the computed summary
against a previously written JSON file and fails with a printed diff when
anything changed. This is useful after editing the response sheet by hand,
or as a regression check when upgrading `mcqgrade` itself.

*/
