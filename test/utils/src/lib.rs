pub fn syllabus_fixture() -> &'static str {
    return r#"
CS 101: Introduction to Programming

Unit 1 - Variables, types, and expressions
Unit 2 - Control flow: conditionals and loops
Unit 3 - Functions and scope
Unit 4 - Collections: lists, maps, and sets
Unit 5 - File IO and error handling

Assessment: weekly quizzes, one midterm, final project.
"#
    .trim();
}

pub fn search_reply_fixture() -> &'static str {
    return "Great choice! Let me look for material.\n[SEARCH]best books for learning linear algebra";
}

pub fn serper_fixture() -> &'static str {
    return r#"{
  "searchParameters": { "q": "linear algebra books", "type": "search" },
  "organic": [
    {
      "title": "Linear Algebra Done Right",
      "link": "https://linear.axler.net/",
      "snippet": "Linear Algebra Done Right by Sheldon Axler, free open access edition."
    },
    {
      "title": "MIT 18.06",
      "link": "https://ocw.mit.edu/courses/18-06-linear-algebra-spring-2010/",
      "snippet": "Gilbert Strang's video lectures on linear algebra."
    }
  ]
}"#;
}
